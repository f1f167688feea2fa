//! Halted payment batches, saved so `--lote` re-sends the same plan.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};

use tesoreria_core::allocation::{ApplicationPlan, BatchId};

/// File holding the plan of `batch_id`.
pub(crate) fn path_for(dir: &Path, batch_id: BatchId) -> PathBuf {
    dir.join(format!("lote-{batch_id}.json"))
}

/// Writes `plan` under `dir` and returns its path.
pub(crate) fn save(dir: &Path, plan: &ApplicationPlan) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = path_for(dir, plan.batch_id);
    fs::write(&path, serde_json::to_vec_pretty(plan)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Reads the saved plan of `batch_id`.
pub(crate) fn load(dir: &Path, batch_id: BatchId) -> anyhow::Result<ApplicationPlan> {
    let path = path_for(dir, batch_id);
    let raw = fs::read(&path).with_context(|| format!("no saved batch at {}", path.display()))?;
    let plan: ApplicationPlan =
        serde_json::from_slice(&raw).with_context(|| format!("reading {}", path.display()))?;
    if plan.batch_id != batch_id || !plan.has_stable_keys() {
        bail!("{} does not belong to batch {batch_id}", path.display());
    }
    Ok(plan)
}

/// Removes the saved plan once the batch completes.
pub(crate) fn discard(dir: &Path, batch_id: BatchId) {
    let path = path_for(dir, batch_id);
    match fs::remove_file(&path) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => tracing::warn!(error = %err, path = %path.display(), "saved batch not removed"),
    }
}
