use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use dialoguer::Confirm;
use std::path::{Path, PathBuf};
use tracing::warn;

use layout_mapper::calibrate::{self, ClickRecord};
use layout_mapper::compare::compare_layouts;
use layout_mapper::config::{self, MapperConfig, Screen};
use layout_mapper::document::{self, Layout};
use layout_mapper::input::CLICK_PLAN;
use layout_mapper::region::SizeMode;
use layout_mapper::{ValidationReport, generate_layout, render, validate_layout};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("layout-mapper")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates a mirrored, labelled screen layout from 68 reference clicks")
        .subcommand_required(true)
        .subcommand(Command::new("plan").about("Print the order in which the 68 points are clicked"))
        .subcommand(
            Command::new("generate")
                .about("Build, validate and save a layout document from a click record")
                .arg(
                    Arg::new("clicks")
                        .long("clicks")
                        .value_name("FILE")
                        .help("Click record JSON: {\"resolution\": \"1920x1080\", \"clicks\": [[x, y], ...]}")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .value_name("FILE")
                        .help("Layout document to write")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("screenshot")
                        .long("screenshot")
                        .value_name("IMAGE")
                        .help("Screenshot the clicks were taken on; sets screen size and enables the overlay")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("resolution")
                        .long("resolution")
                        .value_name("WxH")
                        .help("Screen size when no screenshot is given (e.g. 1920x1080)"),
                )
                .arg(
                    Arg::new("label")
                        .long("label")
                        .value_name("NAME")
                        .help("Document key; defaults to the screen's WxH"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .help("Mapper settings JSON")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("compare")
                        .long("compare")
                        .value_name("FILE")
                        .help("Reference layout document to compare the result against")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .help("Save even if validation fails, without asking")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("plan", _)) => {
            print_plan();
            Ok(())
        }
        Some(("generate", args)) => run_generate(args),
        _ => bail!("Unknown subcommand"),
    }
}

fn print_plan() {
    let mut first = 1;
    for segment in &CLICK_PLAN {
        let last = first + segment.points() - 1;
        let size = match segment.category.size_mode() {
            SizeMode::PerRegion => "own size",
            SizeMode::Shared => "shared size",
        };
        println!(
            "{:>2}-{:<2} {:<18} {} pairs ({}), {}; {}",
            first,
            last,
            segment.category.to_string(),
            segment.pairs,
            segment.convention,
            segment.hint,
            size
        );
        first = last + 1;
    }
}

fn run_generate(args: &ArgMatches) -> Result<()> {
    let clicks_path = args.get_one::<PathBuf>("clicks").context("--clicks is required")?;
    let output = args.get_one::<PathBuf>("output").context("--output is required")?;
    let screenshot = args.get_one::<PathBuf>("screenshot");
    let settings = config::load_config(args.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    let record = calibrate::load_clicks(clicks_path)
        .with_context(|| format!("Failed to load clicks from {}", clicks_path.display()))?;

    // Step 1: Screen size (screenshot > --resolution > recorded resolution)
    let screen = resolve_screen(screenshot, args.get_one::<String>("resolution"), &record)?;
    let label = args
        .get_one::<String>("label")
        .cloned()
        .unwrap_or_else(|| screen.label());
    println!("Resolution: {} ({}x{})", label, screen.width, screen.height);

    // Step 2: Generate both halves
    let layout = generate_layout(&record.clicks, screen.width).context("Failed to generate layout")?;

    // Step 3: Validate; a failed report blocks saving unless acknowledged
    let report = validate_layout(&layout, screen);
    print_report(&report);
    if !report.passed {
        let proceed = args.get_flag("yes")
            || !settings.confirm_on_failure
            || Confirm::new()
                .with_prompt("Validation failed. Continue anyway?")
                .default(false)
                .interact()
                .context("Failed to read confirmation")?;
        if !proceed {
            bail!("Aborted: layout failed validation");
        }
    }

    if settings.save_clicks {
        let backup = settings.output_dir.join(format!("clicks_{}.json", label));
        let record = ClickRecord {
            resolution: Some(label.clone()),
            clicks: record.clicks.clone(),
        };
        match calibrate::save_clicks(&backup, &record) {
            Ok(()) => println!("Clicks backup: {}", backup.display()),
            Err(e) => warn!("Clicks backup not written to {}: {}", backup.display(), e),
        }
    }

    // Step 4: Persist, then the optional review outputs
    let failed = write_outputs(
        output,
        &label,
        layout,
        screenshot,
        args.get_one::<PathBuf>("compare"),
        &settings,
    )?;
    if failed > 0 {
        println!("Layout saved; {} review output(s) failed, see warnings", failed);
    }

    Ok(())
}

/// Saves the document first so a failing overlay or comparison cannot lose it.
/// Returns how many review outputs failed.
fn write_outputs(
    output: &Path,
    label: &str,
    layout: Layout,
    screenshot: Option<&PathBuf>,
    reference: Option<&PathBuf>,
    settings: &MapperConfig,
) -> Result<usize> {
    let doc = document::to_document(label, layout);
    document::save_document(output, &doc)
        .with_context(|| format!("Failed to save layout to {}", output.display()))?;
    println!("Layout document: {}", output.display());
    let layout = doc.get(label).context("Saved document lost its layout")?;

    let mut failed = 0;
    if let (Some(screenshot), true) = (screenshot, settings.render_overlay) {
        let overlay = settings.output_dir.join(format!("visualization_{}.png", label));
        match render::draw_overlay(screenshot, layout, &overlay) {
            Ok(()) => println!("Visualization: {}", overlay.display()),
            Err(e) => {
                warn!("Overlay not written: {:#}", e);
                failed += 1;
            }
        }
    }
    if let Some(Err(e)) = reference.map(|reference| print_comparison(reference, label, layout)) {
        warn!("Comparison skipped: {:#}", e);
        failed += 1;
    }
    Ok(failed)
}

fn resolve_screen(screenshot: Option<&PathBuf>, resolution: Option<&String>, record: &ClickRecord) -> Result<Screen> {
    if let Some(path) = screenshot {
        let (w, h) = image::image_dimensions(path)
            .with_context(|| format!("Failed to read screenshot dimensions: {}", path.display()))?;
        let width = i32::try_from(w).context("Screenshot too wide")?;
        let height = i32::try_from(h).context("Screenshot too tall")?;
        return Ok(Screen::new(width, height));
    }
    match resolution.or(record.resolution.as_ref()) {
        Some(label) => config::parse_resolution(label),
        None => bail!("Screen size unknown: pass --screenshot or --resolution, or record it in the clicks file"),
    }
}

fn print_report(report: &ValidationReport) {
    if report.passed {
        println!("Validation passed ({} warnings)", report.warnings.len());
    } else {
        println!("Validation failed:");
    }
    for error in &report.errors {
        println!("  error: {}", error);
    }
    for warning in &report.warnings {
        println!("  warning: {}", warning);
    }
}

fn print_comparison(reference: &Path, label: &str, layout: &Layout) -> Result<()> {
    let doc = document::load_document(reference)
        .with_context(|| format!("Failed to load reference layout {}", reference.display()))?;
    // Same resolution if present, otherwise the only entry
    let expected = match doc.get(label) {
        Some(expected) => expected,
        None if doc.len() == 1 => doc.values().next().context("Reference document is empty")?,
        None => bail!("Reference {} has no layout for {}", reference.display(), label),
    };

    println!("Comparison against {}:", reference.display());
    for comparison in compare_layouts(expected, layout) {
        let counts = if comparison.count_matches() {
            String::new()
        } else {
            format!(
                " (count {} vs expected {})",
                comparison.calculated_count, comparison.expected_count
            )
        };
        println!(
            "  {:<18} mean {:.1}px, max {:.1}px{}",
            comparison.category,
            comparison.mean_error(),
            comparison.max_error(),
            counts
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_mapper::geometry::Size;
    use layout_mapper::region::RegionSet;

    fn empty_layout() -> Layout {
        Layout {
            regions: RegionSet::default(),
            participant_box_params: Size::new(60, 40),
            selected_slot_params: Size::new(24, 24),
        }
    }

    #[test]
    fn test_failed_review_outputs_keep_document() {
        let dir = std::env::temp_dir().join("layout_mapper_outputs_test");
        let output = dir.join("layout.json");
        let settings = MapperConfig {
            output_dir: dir.clone(),
            ..MapperConfig::default()
        };
        let screenshot = dir.join("no_such_screenshot.png");
        let reference = dir.join("no_such_reference.json");

        let failed = write_outputs(
            &output,
            "1920x1080",
            empty_layout(),
            Some(&screenshot),
            Some(&reference),
            &settings,
        )
        .unwrap();
        assert_eq!(failed, 2);
        let saved = document::load_document(&output).unwrap();
        assert_eq!(saved.get("1920x1080"), Some(&empty_layout()));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
