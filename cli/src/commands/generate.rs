//! `fanout generate` — the full pipeline: allocate, derive recipients,
//! batch, export, then record the indices actually used.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use fanout_batching::{analyze_batches, create_batches, Batch};
use fanout_derivation::{
    approaching_index_limit, derive_recipients, source_fingerprint, FileAddressBook,
};
use fanout_store::{DerivationStateStore, JsonFileStore, StateKey};

use crate::commands::{make_rng, run_allocation};
use crate::config::ToolConfig;
use crate::export::{self, RunReport};
use crate::input;
use crate::GenerateArgs;

pub fn run(args: &GenerateArgs, config: &ToolConfig) -> Result<()> {
    let alloc = &args.allocation;
    let base_path = args
        .base_path
        .clone()
        .unwrap_or_else(|| config.base_path.clone());

    if let Some(ceiling) = args.max_per_batch {
        input::validate_batch_ceiling(ceiling)?;
    }

    // Fingerprint the key source; fall back to the address book path so
    // state still keys consistently when no source file is given.
    let source = match &args.source_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading source file {}", path.display()))?
            .trim()
            .to_string(),
        None => args.addresses.display().to_string(),
    };
    let fingerprint = source_fingerprint(&source);
    let key = StateKey::new(fingerprint, base_path.clone());
    let store = JsonFileStore::new(&config.state_file);

    let start_index = if args.continue_last {
        match store.last_index(&key)? {
            Some(last) => last.saturating_add(1),
            None => 0,
        }
    } else {
        args.start_index.unwrap_or(0)
    };

    let mut rng = make_rng(alloc.seed);
    let outcome = run_allocation(
        alloc.mode,
        alloc.total,
        alloc.count,
        alloc.min,
        alloc.max,
        &mut rng,
    )?;
    let plan = &outcome.plan;
    let used = plan.used_count();
    if used < alloc.count {
        tracing::info!(
            "degraded from {} to {} recipients to keep every payment viable",
            alloc.count,
            used
        );
    }

    if approaching_index_limit(start_index, used) {
        tracing::warn!("derivation indices are close to the non-hardened ceiling");
    }

    let book = FileAddressBook::load(&args.addresses)
        .with_context(|| format!("loading address book {}", args.addresses.display()))?;
    let recipients = derive_recipients(&book, &base_path, start_index, used)?;

    let batches: Option<Vec<Batch>> = match args.max_per_batch {
        Some(ceiling) => Some(create_batches(
            &recipients,
            &plan.amounts,
            ceiling,
            args.randomize_batches,
            &mut rng,
        )?),
        None => None,
    };

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating output dir {}", config.output_dir.display()))?;
    let stem = config.output_dir.join(&args.out).display().to_string();

    let csv_path = PathBuf::from(format!("{stem}.csv"));
    let mut csv = BufWriter::new(
        File::create(&csv_path).with_context(|| format!("creating {}", csv_path.display()))?,
    );
    export::write_plain_csv(&mut csv, &recipients, &plan.amounts)?;
    csv.flush()?;

    if let Some(ref batches) = batches {
        for batch in batches {
            let path = PathBuf::from(export::batch_file_name(&stem, batch.number));
            let mut w = BufWriter::new(
                File::create(&path).with_context(|| format!("creating {}", path.display()))?,
            );
            export::write_batch_csv(&mut w, batch)?;
            w.flush()?;
        }
    }

    let mode = alloc.mode.to_string();
    let report = RunReport {
        generated_at: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        fingerprint,
        base_path: &base_path,
        mode: &mode,
        total: alloc.total,
        recipients: &recipients,
        amounts: &plan.amounts,
        bounds_info: outcome.bounds_info.as_ref(),
        quality: outcome.quality.as_ref(),
        batches: batches.as_deref(),
        batch_ceiling: args.max_per_batch,
    };
    let report_path = PathBuf::from(format!("{stem}_report.txt"));
    let mut report_w = BufWriter::new(
        File::create(&report_path)
            .with_context(|| format!("creating {}", report_path.display()))?,
    );
    export::write_report(&mut report_w, &report)?;
    report_w.flush()?;

    // Record what was actually used, not what was requested; a degraded
    // run must not burn unused indices.
    let last_used = start_index + used as u32 - 1;
    store.record_last_index(&key, last_used)?;
    tracing::info!(
        "recorded last index {} for fingerprint {:06}",
        last_used,
        fingerprint
    );

    println!("Generated {used} payments (indices {start_index}..={last_used})");
    println!("  Wallet CSV: {}", csv_path.display());
    if let Some(ref batches) = batches {
        println!("  Batch files: {}", batches.len());
        if let Some(stats) = analyze_batches(batches, alloc.total) {
            println!(
                "  Batch totals: {} .. {} across {} batches",
                stats.min_batch_amount, stats.max_batch_amount, stats.batch_count
            );
        }
    }
    println!("  Report: {}", report_path.display());
    Ok(())
}
