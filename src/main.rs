// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, Level};

use tunetools::render::{chart_line, chord_notes_line, fretboard_diagram, suggestion_block};
use tunetools::{Engine, Instrument, KeyPreference, Settings};

fn print_usage() {
    println!("tunetools - Chord and scale tools for musicians");
    println!();
    println!("Usage: tunetools -m <MODE> -i <INPUT> [OPTIONS]");
    println!();
    println!("Modes:");
    println!("  create_chord_chart       Chord chart from lines of notes (\"C Eb G\")");
    println!("  get_chord_notes          Notes of each printed chord (\"Am7\", \"G/B\")");
    println!("  suggest_scales           Scales to play over each printed chord");
    println!("  print_chord_fingerboard  Draw each chord on an instrument");
    println!("  print_scale_fingerboard  Draw each scale (\"A natural minor\") on an instrument");
    println!();
    println!("Options:");
    println!("  -i, --input <FILE|TEXT>  Input file, or literal text; one item per line");
    println!("  -m, --mode <MODE>        What to do with the input");
    println!("  -k, --keys <b|#>         Spell accidentals as flats or sharps (default b)");
    println!("  -w, --weights            Weight the chord search by chord frequency");
    println!("  -n, --notes              List the notes of each generated chord");
    println!("  --instrument <NAME>      guitar, bass, ukulele, violin or mandolin");
    println!("  --config <FILE>          Read settings from a TOML file");
    println!("  --seed <N>               Seed the chord search for repeatable charts");
    println!("  --trials <N>             Chord search trials per tier (default 1000)");
    println!("  --verbose                Log search progress to stderr");
    println!("  --help                   Show this help message");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    ChordChart,
    ChordNotes,
    SuggestScales,
    ChordFingerboard,
    ScaleFingerboard,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create_chord_chart" => Ok(Mode::ChordChart),
            "get_chord_notes" => Ok(Mode::ChordNotes),
            "suggest_scales" => Ok(Mode::SuggestScales),
            "print_chord_fingerboard" => Ok(Mode::ChordFingerboard),
            "print_scale_fingerboard" => Ok(Mode::ScaleFingerboard),
            other => Err(anyhow!("Unknown mode: {}", other)),
        }
    }
}

/// Command line arguments; anything left unset falls back to the settings
#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    mode: Option<Mode>,
    keys: Option<KeyPreference>,
    weights: bool,
    notes: bool,
    instrument: Option<Instrument>,
    config: Option<String>,
    seed: Option<u64>,
    trials: Option<usize>,
    verbose: bool,
    help: bool,
}

fn value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<&'a String> {
    iter.next()
        .ok_or_else(|| anyhow!("{} requires a value", flag))
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-i" | "--input" => parsed.input = Some(value(&mut iter, arg)?.clone()),
            "-m" | "--mode" => parsed.mode = Some(value(&mut iter, arg)?.parse()?),
            "-k" | "--keys" => parsed.keys = Some(value(&mut iter, arg)?.parse()?),
            "-w" | "--weights" => parsed.weights = true,
            "-n" | "--notes" => parsed.notes = true,
            "--instrument" => parsed.instrument = Some(value(&mut iter, arg)?.parse()?),
            "--config" => parsed.config = Some(value(&mut iter, arg)?.clone()),
            "--seed" => {
                let raw = value(&mut iter, arg)?;
                parsed.seed = Some(raw.parse().map_err(|_| anyhow!("Invalid seed: {}", raw))?);
            }
            "--trials" => {
                let raw = value(&mut iter, arg)?;
                parsed.trials = Some(raw.parse().map_err(|_| anyhow!("Invalid trial count: {}", raw))?);
            }
            "--verbose" | "-v" => parsed.verbose = true,
            "--help" | "-h" => parsed.help = true,
            other => bail!("Unknown option: {}", other),
        }
    }

    Ok(parsed)
}

/// Settings file first, then command line overrides
fn settings_for(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(key) = args.keys {
        settings.key = key;
    }
    if args.weights {
        settings.weighted = true;
    }
    if args.notes {
        settings.show_notes = true;
    }
    if args.instrument.is_some() {
        settings.instrument = args.instrument;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if let Some(trials) = args.trials {
        settings.trials = trials;
    }
    if args.verbose {
        settings.log_level = "debug".to_string();
    }
    Ok(settings)
}

/// Input lines from a file, or the argument itself when no such file exists
fn read_input(input: &str) -> Result<Vec<String>> {
    let text = if Path::new(input).is_file() {
        fs::read_to_string(input).with_context(|| format!("Failed to read input file: {}", input))?
    } else {
        input.to_string()
    };
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn create_chord_chart(engine: &Engine, lines: &[String], seed: Option<u64>, show_notes: bool) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut chords = Vec::with_capacity(lines.len());
    for line in lines {
        let target = engine.parse_notes(line)?;
        let chord = engine
            .resolve_chord_from_target(&target, &mut rng)
            .with_context(|| format!("No chord for notes: {}", line))?;
        debug!(%line, chord = %chord.label, "chart entry");
        chords.push(chord);
    }

    let labels: Vec<&str> = chords.iter().map(|c| c.label.as_str()).collect();
    println!("{}", chart_line(&labels));

    if show_notes {
        println!();
        println!("Chord notes:");
        for chord in &chords {
            let notes = engine.tables().chromatic.spell_all(&chord.notes, engine.key())?;
            println!("{}", chord_notes_line(&chord.label, &notes));
        }
    }
    Ok(())
}

fn get_chord_notes(engine: &Engine, lines: &[String]) -> Result<()> {
    for line in lines {
        let notes = engine.chord_notes(line)?;
        println!("{}", chord_notes_line(line, &notes));
    }
    Ok(())
}

fn suggest_scales(engine: &Engine, lines: &[String]) -> Result<()> {
    for line in lines {
        let chord = engine.resolve_chord_from_text(line)?;
        let suggestions = engine.suggest_scales(&chord)?;
        println!("{}", suggestion_block(&chord.label, &suggestions));
        println!();
    }
    Ok(())
}

fn print_fingerboard(engine: &Engine, instrument: Instrument, label: &str, notes: &[u8]) -> Result<()> {
    let map = engine.map_note_set_to_fretboard(instrument, notes)?;
    let layout = engine.tables().layouts.for_instrument(instrument);
    println!("{}", fretboard_diagram(label, instrument, layout, &map));
    println!();
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let settings = settings_for(args)?;
    let level: Level = settings.level()?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mode = args
        .mode
        .ok_or_else(|| anyhow!("--mode is required; run with --help for usage"))?;
    let input = args
        .input
        .as_deref()
        .ok_or_else(|| anyhow!("--input is required; run with --help for usage"))?;
    let lines = read_input(input)?;

    let engine = settings.engine()?;
    info!(?mode, key = %engine.key(), lines = lines.len(), "running");

    match mode {
        Mode::ChordChart => create_chord_chart(&engine, &lines, settings.seed, settings.show_notes)?,
        Mode::ChordNotes => get_chord_notes(&engine, &lines)?,
        Mode::SuggestScales => suggest_scales(&engine, &lines)?,
        Mode::ChordFingerboard | Mode::ScaleFingerboard => {
            let instrument = settings.instrument.ok_or_else(|| {
                anyhow!("--instrument is required, should be one of: guitar, bass, ukulele, violin, mandolin")
            })?;
            for line in &lines {
                if mode == Mode::ChordFingerboard {
                    let chord = engine.resolve_chord_from_text(line)?;
                    print_fingerboard(&engine, instrument, &chord.label, &chord.notes)?;
                } else {
                    let scale = engine.resolve_scale_from_text(line)?;
                    print_fingerboard(&engine, instrument, &scale.label, &scale.notes)?;
                }
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let argv: Vec<String> = env::args().skip(1).collect();

    if argv.is_empty() {
        println!("tunetools - Chord and scale tools for musicians");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if args.help {
        print_usage();
        return Ok(());
    }

    run(&args)
}
