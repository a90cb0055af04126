// main.rs - CLI entry point

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Instant;

use locus_variability::cli::Config;
use locus_variability::output::{
    check_locus_output_paths, create_folder_structure, print_position_report,
};
use locus_variability::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let input = args.input.clone().ok_or("--input is required")?;

    println!("🚀 locusvar v{}", env!("CARGO_PKG_VERSION"));
    println!("⚡ Strategy: Load alignments → Per-position counts → Entropy + rarity → JSON");

    // Validate all arguments
    let validation_result = validate_args(&args)?;

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        let num_threads = rayon::current_num_threads();
        println!("🧵 Threads: {} (auto-detected)", num_threads);
    }

    let total_start = Instant::now();

    // Load aligned sequences
    let loci = load_loci(Path::new(&input), validation_result.input_format)?;
    let loci = validation_result.selection.apply(loci)?;
    report_loaded_loci(&loci);

    if args.dry_run {
        println!("✅ Dry run completed successfully");
        println!(
            "📊 Loci: {} ({} sequences)",
            loci.len(),
            loci.iter().map(Locus::len).sum::<usize>()
        );
        return Ok(());
    }

    let output_root = Path::new(&args.output);
    let folders = create_folder_structure(output_root)?;
    println!("📁 Output folders ready under {} ({} folders)", output_root.display(), folders);

    // Compute variability for every locus
    println!("\n🔄 Computing per-position variability...");
    let builder = VariabilityBuilder::new(validation_result.ingest, args.strict_alphabet);

    let pb = ProgressBar::new(loci.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} loci processed")
            .map_err(|e| format!("Invalid progress template: {}", e))?,
    );
    let corpus = builder
        .build_corpus_with_progress(&loci, &pb)
        .map_err(|e| e.to_string())?;
    pb.finish_with_message("✅ Loci processed!");
    check_locus_output_paths(output_root, &corpus)?;

    // Write per-locus output
    let mut total_positions = 0;
    for (locus, variability) in corpus.iter() {
        let summary = variability.summary();
        total_positions += summary.positions;

        println!("🧬 {}", locus);
        println!(
            "  • Positions: {} ({} variable, {} all-gap)",
            summary.positions, summary.variable_positions, summary.empty_positions
        );
        println!(
            "  • Mean normalised entropy: {:.4}",
            summary.mean_normalised_entropy
        );
        if let Some((position, entropy)) = summary.most_variable {
            println!("  • Most variable position: {} ({:.4})", position, entropy);
        }
        let empty_positions = variability.empty_positions();
        if !empty_positions.is_empty() {
            println!(
                "  ⚠️  All-gap positions kept as empty records: {:?}",
                empty_positions
            );
        }

        if !validation_result.report_positions.is_empty() {
            print_position_report(locus, variability, &validation_result.report_positions);
        }

        let path = write_locus_variability(output_root, locus, variability)?;
        println!("  📄 Written to: {}", path.display());
    }

    write_corpus(output_root, &args.corpus_name, &corpus)?;

    if let Some(table_path) = &args.entropy_table {
        write_entropy_table(Path::new(table_path), &corpus, &command_line)?;
    }

    // Print summary
    let total_elapsed = total_start.elapsed();
    println!("\n🎉 === LOCUSVAR COMPLETED SUCCESSFULLY ===");
    println!(
        "⏱️  Total execution time: {:.2}s",
        total_elapsed.as_secs_f64()
    );
    println!(
        "📊 Loci processed: {} ({} positions)",
        corpus.len(),
        total_positions
    );
    println!("📁 Output written to: {}", output_root.display());
    println!("🕒 Finished: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("🔧 Command: {}", command_line);

    Ok(())
}

/// Print per-locus sequence counts and warn about ragged alignments
fn report_loaded_loci(loci: &[Locus]) {
    println!(
        "✅ Loaded {} loci, {} sequences",
        loci.len(),
        loci.iter().map(Locus::len).sum::<usize>()
    );
    for locus in loci {
        if locus.is_empty() {
            println!("⚠️  {}: no sequences", locus.name);
        } else if !locus.has_uniform_length() {
            if let Some((min, max)) = locus.length_range() {
                println!(
                    "⚠️  {}: aligned lengths differ ({}-{}); shorter sequences stop contributing early",
                    locus.name, min, max
                );
            }
        }
    }
}
