use std::path::PathBuf;

use anyhow::Context as _;
use kumite_model::ModelArtifact;
use kumite_training::{GridSearch, SPLIT_SEED, build_dataset, read_match_log, train};
use rand_pcg::Pcg64Mcg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Path to the historical match log CSV
    #[arg(long)]
    data: PathBuf,
    /// Output artifact path
    #[arg(long)]
    output: PathBuf,
    /// Model name recorded in the artifact
    #[arg(long, default_value = "kumite")]
    name: String,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg { data, output, name } = arg;

    let rows = read_match_log(data)?;
    eprintln!("Loaded {} rows from {}", rows.len(), data.display());

    let dataset = build_dataset(&rows)?;
    eprintln!(
        "Built {} train / {} validation samples",
        dataset.train_features.len(),
        dataset.val_features.len()
    );

    let search = GridSearch::default();
    // training shares the split seed so repeated runs are comparable
    let mut rng = Pcg64Mcg::new(SPLIT_SEED);
    let trained = train(&dataset, &search, &mut rng);

    println!("{}", trained.report);

    let artifact = ModelArtifact::new(
        name.clone(),
        dataset.scaler.clone(),
        trained.classifier,
        trained.report.mean_accuracy(),
    );
    artifact
        .save(output)
        .with_context(|| format!("failed to save artifact to {}", output.display()))?;

    eprintln!();
    eprintln!("Model saved successfully");
    eprintln!("  Path: {}", output.display());
    eprintln!("  Name: {}", artifact.name);
    eprintln!("  Trained at: {}", artifact.trained_at);
    eprintln!("  CV accuracy: {:.3}", trained.cv_accuracy);
    eprintln!("  Validation accuracy: {:.3}", artifact.validation_accuracy);

    Ok(())
}
