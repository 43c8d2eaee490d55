use super::GeneratedMaps;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// ES module exporting `PROVINCE_MAPS` and `REGION_TO_PROVINCE`.
    #[default]
    TypeScript,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ts" | "typescript" => Ok(Self::TypeScript),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected ts or json)")),
        }
    }
}

pub fn render(maps: &GeneratedMaps, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(maps),
        OutputFormat::TypeScript => {
            let provinces = serde_json::to_string_pretty(&maps.province_maps)?;
            let regions = serde_json::to_string_pretty(&maps.region_to_province)?;
            Ok(format!(
                "// Generated by `broker-ai-api boundaries generate`. Do not edit by hand.\n\n\
                 export const PROVINCE_MAPS: Record<string, {{ viewBox: string; paths: Record<string, string> }}> = {provinces};\n\n\
                 export const REGION_TO_PROVINCE: Record<string, string> = {regions};\n"
            ))
        }
    }
}

/// Writes through a sibling temporary file so an interrupted run never
/// leaves a truncated module behind.
pub fn write_output(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let staging = path.with_extension("partial");
    fs::write(&staging, contents)?;
    fs::rename(&staging, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::boundary::ProvinceMap;
    use std::collections::BTreeMap;

    fn sample() -> GeneratedMaps {
        let mut maps = GeneratedMaps::default();
        maps.province_maps.insert(
            "제주특별자치도".to_string(),
            ProvinceMap {
                view_box: "0 0 400 180".to_string(),
                paths: BTreeMap::from([("제주시".to_string(), "M0,0 L10,0 L10,10 Z".to_string())]),
            },
        );
        maps.region_to_province
            .insert("제주시".to_string(), "제주특별자치도".to_string());
        maps
    }

    #[test]
    fn typescript_module_exports_both_tables() {
        let module = render(&sample(), OutputFormat::TypeScript).expect("renders");
        assert!(module.contains("export const PROVINCE_MAPS"));
        assert!(module.contains("export const REGION_TO_PROVINCE"));
        assert!(module.contains("\"viewBox\": \"0 0 400 180\""));
        assert!(module.contains("\"제주시\": \"제주특별자치도\""));
    }

    #[test]
    fn json_document_uses_camel_case_tables() {
        let document = render(&sample(), OutputFormat::Json).expect("renders");
        let value: serde_json::Value = serde_json::from_str(&document).expect("valid json");
        assert_eq!(
            value["provinceMaps"]["제주특별자치도"]["paths"]["제주시"],
            "M0,0 L10,0 L10,10 Z"
        );
        assert_eq!(value["regionToProvince"]["제주시"], "제주특별자치도");
        assert!(value.get("skipped").is_none());
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("TS".parse::<OutputFormat>(), Ok(OutputFormat::TypeScript));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn write_replaces_target_atomically() {
        let dir = std::env::temp_dir().join(format!("broker-ai-maps-{}", std::process::id()));
        let target = dir.join("provinceMaps.ts");

        write_output(&target, "first").expect("writes");
        write_output(&target, "second").expect("overwrites");

        assert_eq!(fs::read_to_string(&target).expect("readable"), "second");
        assert!(!target.with_extension("partial").exists());
        fs::remove_dir_all(&dir).ok();
    }
}
