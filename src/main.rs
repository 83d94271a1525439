// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Laura CLI entrypoint.
//!
//! By default this runs the interactive visitor map in the terminal. `--svg` writes the map as an
//! SVG document instead; `--catalog-schema` and `--dump-catalog` print catalog JSON.

use std::error::Error;
use std::sync::Arc;

use laura::chat::{GeminiGenerator, TextGenerator, UnavailableGenerator};
use laura::config::Config;
use laura::layout::layout_zones;
use laura::logging::{self, LogTarget};
use laura::panel::AssetResolver;
use laura::render::{render_svg, SvgOptions};
use laura::store::{builtin_catalog, catalog_schema_json, catalog_to_json, load_catalog};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--catalog <file>] [--assets <dir>] [--offline]\n  {program} [--catalog <file>] --svg <out.svg|->\n  {program} [--catalog <file>] --dump-catalog\n  {program} --catalog-schema\n\nWithout an export flag the interactive map runs in the terminal.\n--catalog loads animals and zones from a JSON file instead of the built-in «Лаура» data.\n--assets sets the directory photos are resolved against (default: public, or $LAURA_ASSETS).\n--offline keeps the guide chat offline even when GEMINI_API_KEY is set.\n--svg writes the map as SVG to a file, or to stdout for `-`."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    catalog: Option<String>,
    assets: Option<String>,
    offline: bool,
    svg: Option<String>,
    catalog_schema: bool,
    dump_catalog: bool,
}

impl CliOptions {
    fn is_export(&self) -> bool {
        self.svg.is_some() || self.catalog_schema || self.dump_catalog
    }

    fn apply(&self, config: &mut Config) {
        if let Some(catalog) = &self.catalog {
            config.catalog_path = Some(catalog.into());
        }
        if let Some(assets) = &self.assets {
            config.assets_dir = assets.into();
        }
        config.offline |= self.offline;
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => {
                if options.catalog.is_some() {
                    return Err(());
                }
                options.catalog = Some(args.next().ok_or(())?);
            }
            "--assets" => {
                if options.assets.is_some() {
                    return Err(());
                }
                options.assets = Some(args.next().ok_or(())?);
            }
            "--offline" => {
                if options.offline {
                    return Err(());
                }
                options.offline = true;
            }
            "--svg" => {
                if options.svg.is_some() {
                    return Err(());
                }
                options.svg = Some(args.next().ok_or(())?);
            }
            "--catalog-schema" => {
                if options.catalog_schema {
                    return Err(());
                }
                options.catalog_schema = true;
            }
            "--dump-catalog" => {
                if options.dump_catalog {
                    return Err(());
                }
                options.dump_catalog = true;
            }
            _ => return Err(()),
        }
    }

    let exports = usize::from(options.svg.is_some())
        + usize::from(options.catalog_schema)
        + usize::from(options.dump_catalog);
    if exports > 1 {
        return Err(());
    }

    if options.catalog_schema && (options.catalog.is_some() || options.assets.is_some()) {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "laura".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let mut config = Config::from_env()?;
        options.apply(&mut config);

        let log_target = if options.is_export() {
            LogTarget::Stderr
        } else {
            LogTarget::for_tui(config.log_file.as_deref())
        };
        logging::init(config.log_filter.as_deref(), log_target)?;
        tracing::debug!(?config, "configuration loaded");

        if options.catalog_schema {
            println!("{}", catalog_schema_json()?);
            return Ok(());
        }

        let catalog = match &config.catalog_path {
            Some(path) => load_catalog(path)?,
            None => builtin_catalog()?,
        };
        tracing::info!(
            animals = catalog.animals().count(),
            zones = catalog.zones().len(),
            "catalog loaded"
        );

        if options.dump_catalog {
            println!("{}", catalog_to_json(&catalog)?);
            return Ok(());
        }

        if let Some(out) = options.svg.as_deref() {
            let layouts = layout_zones(&catalog, None, None);
            let svg = render_svg(&layouts, SvgOptions::default());
            if out == "-" {
                print!("{svg}");
            } else {
                std::fs::write(out, svg)?;
                tracing::info!(path = out, "map written");
            }
            return Ok(());
        }

        let generator: Arc<dyn TextGenerator> = match config.effective_api_key() {
            Some(key) => Arc::new(GeminiGenerator::new(key).with_model(config.model.clone())),
            None => {
                tracing::warn!("no API key configured; guide replies will fail");
                Arc::new(UnavailableGenerator)
            }
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let app = laura::tui::App::new(
            catalog,
            generator,
            Box::new(AssetResolver::new(config.assets_dir.clone())),
            runtime.handle().clone(),
        )
        .with_chat_timeout(config.chat_timeout);

        runtime.block_on(async move {
            let tui_join =
                tokio::task::spawn_blocking(move || laura::tui::run(app).map_err(|err| err.to_string()))
                    .await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("laura: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{parse_options, CliOptions};
    use laura::config::Config;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|value| (*value).to_owned())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
        assert!(!options.is_export());
    }

    #[test]
    fn parses_tui_flags() {
        let options = parse_options(args(&["--catalog", "zoo.json", "--assets", "pics", "--offline"]))
            .expect("parse options");
        assert_eq!(options.catalog.as_deref(), Some("zoo.json"));
        assert_eq!(options.assets.as_deref(), Some("pics"));
        assert!(options.offline);
        assert!(!options.is_export());
    }

    #[test]
    fn parses_svg_export() {
        let options = parse_options(args(&["--svg", "-"])).expect("parse options");
        assert_eq!(options.svg.as_deref(), Some("-"));
        assert!(options.is_export());
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config {
            api_key: Some("key".to_owned()),
            ..Config::default()
        };
        let options = parse_options(args(&["--catalog", "zoo.json", "--assets", "pics", "--offline"]))
            .expect("parse options");
        options.apply(&mut config);
        assert_eq!(config.catalog_path, Some(PathBuf::from("zoo.json")));
        assert_eq!(config.assets_dir, PathBuf::from("pics"));
        assert!(config.effective_api_key().is_none());
    }

    #[test]
    fn rejects_unknown_and_positional_args() {
        parse_options(args(&["--nope"])).unwrap_err();
        parse_options(args(&["zoo.json"])).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(args(&["--offline", "--offline"])).unwrap_err();
        parse_options(args(&["--catalog", "a.json", "--catalog", "b.json"])).unwrap_err();
        parse_options(args(&["--svg", "a.svg", "--svg", "b.svg"])).unwrap_err();
    }

    #[test]
    fn rejects_missing_values() {
        parse_options(args(&["--catalog"])).unwrap_err();
        parse_options(args(&["--svg"])).unwrap_err();
    }

    #[test]
    fn rejects_more_than_one_export() {
        parse_options(args(&["--svg", "-", "--dump-catalog"])).unwrap_err();
        parse_options(args(&["--catalog-schema", "--dump-catalog"])).unwrap_err();
    }

    #[test]
    fn schema_export_takes_no_catalog() {
        parse_options(args(&["--catalog-schema", "--catalog", "zoo.json"])).unwrap_err();
        parse_options(args(&["--catalog-schema"])).expect("parse options");
    }
}
