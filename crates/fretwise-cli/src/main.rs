//! fretwise: Triad and scale box diagrams on the command line

mod cli;
mod render;

use anyhow::{bail, Context};
use clap::Parser;
use fretwise_core::catalog::{chord_formulas, scale_formulas};
use fretwise_core::{
    build_chord, build_scale, display_ordered_box_patterns, interval_token_to_semitones,
    is_flat_key, normalize_major_key_name, relative_minor, render_roman_progression_to_chords,
    to_display_name, to_pitch_class, Formula, PitchClass,
};
use fretwise_services::{config_path, load_config, save_config, FretwiseConfig, PatternCache};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{BoxesCommand, Cli, Commands, ConfigAction, FormulaCommand, TriadsCommand};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("fretwise=info"))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    let config = effective_config(&cli)?;

    match &cli.command {
        Commands::Triads(cmd) => triads(cmd, &config, cli.json),
        Commands::Boxes(cmd) => boxes(cmd, &config, cli.json),
        Commands::Chord(cmd) => formula(cmd, "chord", chord_formulas(), build_chord, cli.json),
        Commands::Scale(cmd) => formula(cmd, "scale", scale_formulas(), build_scale, cli.json),
        Commands::Interval(cmd) => {
            let semitones = cmd
                .tokens
                .iter()
                .map(|t| interval_token_to_semitones(t).map(|s| (t.as_str(), s)))
                .collect::<fretwise_core::Result<Vec<_>>>()?;
            if cli.json {
                let map: serde_json::Map<String, serde_json::Value> =
                    semitones.iter().map(|(t, s)| (t.to_string(), json!(s))).collect();
                println!("{}", serde_json::Value::Object(map));
            } else {
                for (token, s) in semitones {
                    println!("{token:>4} = {s} semitones");
                }
            }
            Ok(())
        }
        Commands::Progression(cmd) => {
            let chords = render_roman_progression_to_chords(&cmd.progression, &cmd.key);
            if cli.json {
                println!("{}", json!({ "key": cmd.key, "progression": cmd.progression, "chords": chords }));
            } else {
                println!("{chords}");
            }
            Ok(())
        }
        Commands::Key(cmd) => key(&cmd.key, cli.json),
        Commands::Config(cmd) => match cmd.action {
            ConfigAction::Show => {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&config)?);
                } else {
                    print!("{}", toml::to_string_pretty(&config)?);
                }
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", config_path().display());
                Ok(())
            }
            ConfigAction::Init { force } => {
                let path = config_path();
                if path.exists() && !force {
                    bail!("{} already exists (use --force to replace it)", path.display());
                }
                let path = save_config(&FretwiseConfig::default())?;
                println!("Wrote {}", path.display());
                Ok(())
            }
        },
    }
}

/// The config file with command line overrides applied.
fn effective_config(cli: &Cli) -> anyhow::Result<FretwiseConfig> {
    let mut config = load_config().context("loading config")?;
    if let Some(tuning) = &cli.tuning {
        config.tuning = cli::parse_tuning(tuning);
    }
    if let Some(max_fret) = cli.max_fret {
        config.triads.max_fret = max_fret;
    }
    if cli.experimental {
        config.boxes.experimental_blues_box = true;
    }
    debug!("Effective config: {config:?}");
    Ok(config)
}

fn triads(cmd: &TriadsCommand, config: &FretwiseConfig, json: bool) -> anyhow::Result<()> {
    let data = if fretwise_core::catalog::resolve_chord_id(&cmd.chord) == Some("major") {
        PatternCache::new(config)?.triads(&cmd.key)?
    } else {
        config.triad_engine()?.generate_chord(&cmd.key, &cmd.chord)?.into()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&*data)?);
    } else {
        print!("{}", render::triads_text(&data, &config.tuning()?));
    }
    Ok(())
}

fn boxes(cmd: &BoxesCommand, config: &FretwiseConfig, json: bool) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(center) = cmd.tonal_center {
        config.boxes.tonal_center = center;
    }
    let patterns = PatternCache::new(&config)?.boxes(&cmd.key, cmd.family)?;
    let patterns = if cmd.display_order {
        display_ordered_box_patterns(&patterns, cmd.family)
    } else {
        patterns.to_vec()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&patterns)?);
        return Ok(());
    }
    let tuning = config.tuning()?;
    for (i, pattern) in patterns.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", render::box_text(pattern, &tuning));
    }
    Ok(())
}

fn formula(
    cmd: &FormulaCommand,
    kind: &str,
    catalog: &[Formula],
    build: fn(&str, &str) -> fretwise_core::Result<Vec<PitchClass>>,
    json: bool,
) -> anyhow::Result<()> {
    if cmd.list {
        if json {
            println!("{}", serde_json::to_string_pretty(catalog)?);
        } else {
            for f in catalog {
                println!("{:<18} {:<18} {:?}", f.id, f.name, f.semitones);
            }
        }
        return Ok(());
    }

    let Some(root) = cmd.root.as_deref() else {
        bail!("a root note is required unless --list is given");
    };
    let pitch_classes = build(root, &cmd.formula)
        .with_context(|| format!("building {kind} {root} {}", cmd.formula))?;
    let names: Vec<&str> = pitch_classes.iter().map(|&pc| to_display_name(pc, Some(root))).collect();

    if json {
        let values: Vec<u8> = pitch_classes.iter().map(|pc| pc.value()).collect();
        println!(
            "{}",
            json!({ "root": root, "kind": kind, "formula": cmd.formula, "notes": names, "pitch_classes": values })
        );
    } else {
        println!("{root} {}: {}", cmd.formula, names.join(" "));
    }
    Ok(())
}

fn key(key: &str, json: bool) -> anyhow::Result<()> {
    let name = normalize_major_key_name(key)?;
    let minor = relative_minor(name)?;
    let tonic = to_pitch_class(name)?;
    let scale: Vec<&str> = build_scale(name, "major")?
        .into_iter()
        .map(|pc| to_display_name(pc, Some(name)))
        .collect();
    let signature = if is_flat_key(name) { "flats" } else { "sharps" };

    if json {
        println!(
            "{}",
            json!({
                "key": name,
                "pitch_class": tonic.value(),
                "signature": signature,
                "relative_minor": minor,
                "scale": scale,
            })
        );
    } else {
        println!("{name} major ({signature}), relative minor {minor}m");
        println!("{}", scale.join(" "));
    }
    Ok(())
}
