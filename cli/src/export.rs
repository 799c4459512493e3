//! Export writers: wallet-import CSV, per-batch CSV, and the TXT run
//! report. All writers take `io::Write` so tests run against buffers
//! and commands against files.

use std::io::{self, Write};

use fanout_allocation::{BoundsAdjustment, BoundsInfo, DistributionQuality};
use fanout_batching::Batch;
use fanout_types::{Amount, Recipient};

/// Headerless `address,amount` rows, amounts at exactly 8 digits. This
/// is the import format most wallet tools accept as-is.
pub fn write_plain_csv<W: Write>(
    w: &mut W,
    recipients: &[Recipient],
    amounts: &[Amount],
) -> io::Result<()> {
    for (recipient, amount) in recipients.iter().zip(amounts.iter()) {
        writeln!(w, "{},{amount}", recipient.address)?;
    }
    Ok(())
}

/// One batch as CSV, with a header row.
pub fn write_batch_csv<W: Write>(w: &mut W, batch: &Batch) -> io::Result<()> {
    writeln!(w, "address,amount")?;
    for entry in &batch.entries {
        writeln!(w, "{},{}", entry.recipient.address, entry.amount)?;
    }
    Ok(())
}

/// File name for one batch export: `{stem}_batch_{NNN}.csv`.
pub fn batch_file_name(stem: &str, number: u32) -> String {
    format!("{stem}_batch_{number:03}.csv")
}

/// Everything the TXT report prints about one generate run.
pub struct RunReport<'a> {
    pub generated_at: String,
    pub fingerprint: u32,
    pub base_path: &'a str,
    pub mode: &'a str,
    pub total: Amount,
    pub recipients: &'a [Recipient],
    pub amounts: &'a [Amount],
    pub bounds_info: Option<&'a BoundsInfo>,
    pub quality: Option<&'a DistributionQuality>,
    pub batches: Option<&'a [Batch]>,
    pub batch_ceiling: Option<Amount>,
}

/// Human phrasing for a bounds adjustment note.
pub fn describe_adjustment(adjustment: BoundsAdjustment) -> &'static str {
    match adjustment {
        BoundsAdjustment::MinLoweredToFitTotal => "minimum lowered to fit the total",
        BoundsAdjustment::MaxCappedToLimitRemainder => {
            "maximum capped to limit the final remainder"
        }
        BoundsAdjustment::MinLoweredToFreeLastRecipient => {
            "minimum lowered to leave room for the last recipient"
        }
        BoundsAdjustment::RangeRecentered => "range recentered around the average",
    }
}

fn yes_no(v: bool) -> &'static str {
    if v {
        "yes"
    } else {
        "no"
    }
}

fn section<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    writeln!(w, "{title}")?;
    writeln!(w, "{}", "-".repeat(title.len()))?;
    Ok(())
}

/// The full TXT report: run parameters, one block per recipient, then
/// batch, bounds, and quality sections when available.
pub fn write_report<W: Write>(w: &mut W, report: &RunReport<'_>) -> io::Result<()> {
    let title = "Payment Fan-out Report";
    writeln!(w, "{title}")?;
    writeln!(w, "{}", "=".repeat(title.len()))?;
    writeln!(w, "Generated: {}", report.generated_at)?;
    writeln!(w, "Source fingerprint: {:06}", report.fingerprint)?;
    writeln!(w, "Base path: {}", report.base_path)?;
    writeln!(w, "Mode: {}", report.mode)?;
    writeln!(w, "Total: {}", report.total)?;
    writeln!(w, "Recipients: {}", report.recipients.len())?;
    writeln!(w)?;

    for (recipient, amount) in report.recipients.iter().zip(report.amounts.iter()) {
        writeln!(w, "Index: {}", recipient.index)?;
        writeln!(w, "Path: {}", recipient.path)?;
        writeln!(w, "Address: {}", recipient.address)?;
        writeln!(w, "Amount: {amount}")?;
        writeln!(w, "{}", "-".repeat(40))?;
    }

    if let Some(batches) = report.batches {
        writeln!(w)?;
        match report.batch_ceiling {
            Some(ceiling) => section(w, &format!("Batches (ceiling {ceiling})"))?,
            None => section(w, "Batches")?,
        }
        for batch in batches {
            writeln!(
                w,
                "Batch {:03}: {} addresses, total {}",
                batch.number,
                batch.address_count(),
                batch.total
            )?;
        }
    }

    if let Some(info) = report.bounds_info {
        writeln!(w)?;
        section(w, "Bounds")?;
        writeln!(w, "Average: {}", info.average)?;
        writeln!(
            w,
            "Spread: {:.1}% .. {:.1}% of average",
            info.min_percent_of_avg, info.max_percent_of_avg
        )?;
        if !info.adjustments.is_empty() {
            let notes: Vec<&str> = info
                .adjustments
                .iter()
                .map(|a| describe_adjustment(*a))
                .collect();
            writeln!(w, "Adjustments: {}", notes.join("; "))?;
        }
    }

    if let Some(quality) = report.quality {
        writeln!(w)?;
        section(w, "Quality")?;
        writeln!(w, "Min: {}", quality.actual_min)?;
        writeln!(w, "Max: {}", quality.actual_max)?;
        writeln!(w, "Average: {}", quality.actual_average)?;
        writeln!(
            w,
            "Variation coefficient: {:.2}",
            quality.variation_coefficient
        )?;
        writeln!(
            w,
            "Bound compliance: {:.1}%",
            quality.bound_compliance_percent
        )?;
        writeln!(w, "Last entry excessive: {}", yes_no(quality.excessive_last))?;
        writeln!(w, "Sum exact: {}", yes_no(quality.sum_exact))?;
    }

    Ok(())
}
