use crate::infra::{parse_output_format, parse_year};
use broker_ai::config::AppConfig;
use broker_ai::error::AppError;
use broker_ai::geo::boundary::{
    find_province, render, write_output, BoundaryMapGenerator, BoundarySource, GeneratedMaps,
    HttpBoundarySource, OutputFormat, Province, SimplifyOptions, PROVINCES,
};
use broker_ai::inspection::{
    ChecklistImporter, ChecklistTemplate, GradeBreakdown, Inspection, ItemStatus,
};
use broker_ai::search::{tag_conditions, ConditionMap, ConditionResolver, ResolvedConditions};
use broker_ai::telemetry;
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct BoundariesGenerateArgs {
    /// Destination of the generated module
    #[arg(long)]
    pub(crate) out: PathBuf,
    /// Output format: ts or json
    #[arg(long, default_value = "ts", value_parser = parse_output_format)]
    pub(crate) format: OutputFormat,
    /// Override the simplification tolerance (source units)
    #[arg(long)]
    pub(crate) epsilon: Option<f64>,
    /// Override the per-ring point cap applied before simplification
    #[arg(long)]
    pub(crate) max_points: Option<usize>,
    /// Override the boundary URL template (must contain {province})
    #[arg(long)]
    pub(crate) source_url: Option<String>,
    /// Restrict the run to these provinces (full, short, or legacy names)
    #[arg(long = "province")]
    pub(crate) provinces: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct InspectionGradeArgs {
    /// Checklist CSV export (ID,Category,Item,Status,Note,Photo)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Property identifier printed alongside the grade
    #[arg(long, default_value = "unspecified")]
    pub(crate) property: String,
}

#[derive(Args, Debug)]
pub(crate) struct ConditionsResolveArgs {
    /// Condition map as a JSON object, e.g. '{"pets_allowed": true}'
    #[arg(long)]
    pub(crate) conditions: String,
    /// Card label (used as the sole tag for custom cards)
    #[arg(long, default_value = "")]
    pub(crate) label: String,
    /// Treat the card as admin-authored free-form conditions
    #[arg(long)]
    pub(crate) custom: bool,
    /// Resolve relative to this year instead of the current one
    #[arg(long, value_parser = parse_year)]
    pub(crate) year: Option<i32>,
}

pub(crate) async fn run_boundaries_generate(args: BoundariesGenerateArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    if let Some(epsilon) = args.epsilon {
        config.boundaries.epsilon = epsilon;
    }
    if let Some(max_points) = args.max_points {
        config.boundaries.max_points = max_points;
    }
    if let Some(source_url) = args.source_url {
        config.boundaries.source_url = source_url;
    }

    let provinces = select_provinces(&args.provinces);
    let source = HttpBoundarySource::new(
        config.boundaries.source_url.clone(),
        Duration::from_secs(config.boundaries.timeout_secs),
    )?;
    let generator = BoundaryMapGenerator::new(source, SimplifyOptions::from(&config.boundaries));

    let maps = generate_and_write(&generator, &provinces, &args.out, args.format).await?;
    render_generation_summary(&maps, &args.out);
    Ok(())
}

/// Writes `out` only after at least one province was drawn.
async fn generate_and_write<S: BoundarySource>(
    generator: &BoundaryMapGenerator<S>,
    provinces: &[Province],
    out: &Path,
    format: OutputFormat,
) -> Result<GeneratedMaps, AppError> {
    let maps = generator.generate(provinces).await?;
    let contents = render(&maps, format)?;
    write_output(out, &contents)?;
    Ok(maps)
}

fn select_provinces(requested: &[String]) -> Vec<Province> {
    if requested.is_empty() {
        return PROVINCES.to_vec();
    }

    requested
        .iter()
        .filter_map(|name| {
            let found = find_province(name).copied();
            if found.is_none() {
                warn!(province = %name, "unknown province requested; skipping");
            }
            found
        })
        .collect()
}

fn render_generation_summary(maps: &GeneratedMaps, out: &Path) {
    let regions: usize = maps.province_maps.values().map(|map| map.paths.len()).sum();
    println!(
        "Generated {} provinces ({} regions) -> {}",
        maps.province_maps.len(),
        regions,
        out.display()
    );

    if maps.skipped.is_empty() {
        println!("Skipped provinces: none");
    } else {
        println!("Skipped provinces: {}", maps.skipped.join(", "));
    }
}

pub(crate) fn run_inspection_grade(args: InspectionGradeArgs) -> Result<(), AppError> {
    let items = ChecklistImporter::from_path(&args.csv)?;
    let inspection = Inspection::from_items(args.property, items);
    render_inspection(&inspection, &inspection.breakdown());
    Ok(())
}

fn render_inspection(inspection: &Inspection, breakdown: &GradeBreakdown) {
    println!("Inspection for property {}", inspection.property_id);
    println!(
        "Grade: {} ({})",
        breakdown.grade,
        breakdown.grade.description()
    );
    println!(
        "Rated {} of {} items: {} good, {} fair, {} bad",
        breakdown.rated,
        inspection.items().len(),
        breakdown.good,
        breakdown.fair,
        breakdown.bad
    );
    println!(
        "Good ratio {:.0}%, bad ratio {:.0}%",
        breakdown.good_ratio * 100.0,
        breakdown.bad_ratio * 100.0
    );

    let flagged: Vec<_> = inspection
        .items()
        .iter()
        .filter(|item| item.status == Some(ItemStatus::Bad))
        .collect();
    if !flagged.is_empty() {
        println!("\nItems needing repair");
        for item in flagged {
            let note = item.note.as_deref().unwrap_or("-");
            println!("- [{}] {} ({}): {}", item.id, item.label, item.category, note);
        }
    }
}

pub(crate) fn run_inspection_template() {
    let template = ChecklistTemplate::standard();
    println!("Standard inspection checklist ({} items)", template.item_count());
    for category in template.categories() {
        println!("\n{} [{}]", category.label, category.key);
        for item in &category.items {
            println!("- {item}");
        }
    }
}

pub(crate) fn run_conditions_resolve(args: ConditionsResolveArgs) -> Result<(), AppError> {
    let conditions: ConditionMap = serde_json::from_str(&args.conditions)?;
    let resolver = match args.year {
        Some(year) => ConditionResolver::new(year),
        None => ConditionResolver::for_today(),
    };

    let resolved = resolver.resolve(&conditions, &args.label, args.custom);
    render_resolved(&resolved)?;
    Ok(())
}

fn render_resolved(resolved: &ResolvedConditions) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(resolved)?);
    if !resolved.ignored_keys.is_empty() {
        eprintln!(
            "warning: unrecognized condition keys ignored: {}",
            resolved.ignored_keys.join(", ")
        );
    }
    Ok(())
}

pub(crate) fn run_conditions_tags() {
    println!("Tag-only quick-search conditions");
    for condition in tag_conditions() {
        let categories: Vec<&str> = condition
            .categories
            .iter()
            .map(|category| category.label())
            .collect();
        println!(
            "- {} ({}): {}",
            condition.key,
            condition.label,
            categories.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use broker_ai::geo::boundary::{parse_feature_collection, BoundaryError, FeatureCollection};

    /// Serves the same document for every province.
    struct UniformSource(&'static str);

    impl BoundarySource for UniformSource {
        async fn fetch(&self, _province: &Province) -> Result<FeatureCollection, BoundaryError> {
            parse_feature_collection(self.0.as_bytes())
        }
    }

    const SQUARE: &str = r#"{"features": [
        {"properties": {"name": "중구"}, "geometry": {"type": "Polygon", "coordinates": [
            [[126.96, 37.57], [127.02, 37.57], [127.02, 37.55], [126.96, 37.55], [126.96, 37.57]]
        ]}}
    ]}"#;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("broker-ai-api-{}-{name}", std::process::id()))
            .join("provinceMaps.ts")
    }

    #[tokio::test]
    async fn failed_batch_leaves_previous_module_untouched() {
        let out = scratch("failed-batch");
        write_output(&out, "export const PROVINCE_MAPS = { kept: true };\n").expect("seeded");

        let generator =
            BoundaryMapGenerator::new(UniformSource("<html>502</html>"), SimplifyOptions::default());
        let err = generate_and_write(&generator, &PROVINCES[..2], &out, OutputFormat::TypeScript)
            .await
            .expect_err("nothing drawable");

        assert!(matches!(
            err,
            AppError::Boundary(BoundaryError::NothingGenerated { attempted: 2 })
        ));
        let kept = std::fs::read_to_string(&out).expect("module readable");
        assert!(kept.contains("kept: true"));

        std::fs::remove_dir_all(out.parent().expect("scratch dir")).expect("cleanup");
    }

    #[tokio::test]
    async fn successful_batch_replaces_module() {
        let out = scratch("good-batch");
        write_output(&out, "stale").expect("seeded");

        let generator = BoundaryMapGenerator::new(UniformSource(SQUARE), SimplifyOptions::default());
        let maps = generate_and_write(&generator, &PROVINCES[..1], &out, OutputFormat::TypeScript)
            .await
            .expect("seoul draws");

        assert_eq!(maps.province_maps.len(), 1);
        let module = std::fs::read_to_string(&out).expect("module readable");
        assert!(module.contains("PROVINCE_MAPS"));
        assert!(module.contains("중구"));

        std::fs::remove_dir_all(out.parent().expect("scratch dir")).expect("cleanup");
    }

    #[test]
    fn empty_selection_means_every_province() {
        assert_eq!(select_provinces(&[]).len(), PROVINCES.len());
    }

    #[test]
    fn selection_accepts_aliases_and_skips_unknown_names() {
        let selected = select_provinces(&[
            "제주".to_string(),
            "강원도".to_string(),
            "Narnia".to_string(),
        ]);
        let names: Vec<&str> = selected.iter().map(|p| p.name).collect();
        assert_eq!(names, ["제주특별자치도", "강원특별자치도"]);
    }
}
