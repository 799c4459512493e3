//! `fanout plan` — preview an allocation without touching addresses.

use anyhow::Result;

use crate::commands::{make_rng, run_allocation};
use crate::export::describe_adjustment;
use crate::PlanArgs;

pub fn run(args: &PlanArgs) -> Result<()> {
    let alloc = &args.allocation;
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

    println!("Allocation plan");
    println!("  Mode: {}", alloc.mode);
    println!("  Total: {}", alloc.total);
    println!(
        "  Recipients: {} (requested {})",
        plan.used_count(),
        alloc.count
    );
    if plan.used_count() < alloc.count {
        println!("  Note: degraded to the largest count every recipient can stay viable at");
    }
    println!("  Average: {}", plan.average);
    if let Some(bounds) = plan.bounds {
        println!("  Bounds: {} .. {}", bounds.min, bounds.max);
    }
    if let Some(info) = &outcome.bounds_info {
        println!(
            "  Spread: {:.1}% .. {:.1}% of average",
            info.min_percent_of_avg, info.max_percent_of_avg
        );
        for adjustment in &info.adjustments {
            println!("  Note: {}", describe_adjustment(*adjustment));
        }
    }

    println!();
    for (i, amount) in plan.amounts.iter().enumerate() {
        println!("  {i:>5}  {amount}");
    }

    if let Some(quality) = &outcome.quality {
        println!();
        println!(
            "  Variation coefficient: {:.2}",
            quality.variation_coefficient
        );
        println!(
            "  Bound compliance: {:.1}%",
            quality.bound_compliance_percent
        );
        println!(
            "  Sum exact: {}",
            if quality.sum_exact { "yes" } else { "no" }
        );
    }
    Ok(())
}
