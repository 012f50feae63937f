use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use iconfont::{AdvanceMode, FontOptions, IconFontError};

fn build_command() -> Command {
    Command::new("build")
        .about("Merge code-point-named SVG icons into one SVG font")
        .arg(
            Arg::new("input")
                .help("Directory of U+XXXX.svg files")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("Path to the output SVG font")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("JSON file with font options; flags below override it"),
        )
        .arg(
            Arg::new("font_id")
                .long("font-id")
                .help("Font id and family name"),
        )
        .arg(
            Arg::new("units_per_em")
                .long("units-per-em")
                .help("Units per em (canvas size)")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("margin")
                .long("margin")
                .help("Space kept free on each side of a glyph")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("trim")
                .long("trim")
                .help("Fraction of outlier glyphs ignored at each end when sizing the frame")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("proportional")
                .long("proportional")
                .help("Use each glyph's ink width plus margins as its advance")
                .action(ArgAction::SetTrue),
        )
}

fn rename_command() -> Command {
    Command::new("rename")
        .about("Copy SVG files to U+XXXX.svg names")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help("Directory of arbitrarily named SVG files")
                .default_value("."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Directory to copy renamed files into")
                .default_value("unicode_svgs"),
        )
}

fn options_from_args(args: &ArgMatches) -> Result<FontOptions, IconFontError> {
    let mut options = match args.get_one::<String>("config") {
        Some(path) => FontOptions::load(path)?,
        None => FontOptions::default(),
    };
    if let Some(font_id) = args.get_one::<String>("font_id") {
        options.font_id = font_id.clone();
    }
    if let Some(upm) = args.get_one::<u16>("units_per_em") {
        options.units_per_em = *upm;
    }
    if let Some(margin) = args.get_one::<f64>("margin") {
        options.margin = *margin;
    }
    if let Some(trim) = args.get_one::<f64>("trim") {
        options.trim = *trim;
    }
    if args.get_flag("proportional") {
        options.advance_mode = AdvanceMode::Proportional;
    }
    options.validate()?;
    Ok(options)
}

fn build(args: &ArgMatches) -> Result<(), IconFontError> {
    let options = options_from_args(args)?;
    let input = PathBuf::from(args.get_one::<String>("input").cloned().unwrap_or_default());
    let output = PathBuf::from(args.get_one::<String>("output").cloned().unwrap_or_default());

    log::info!("Loading glyphs from {}", input.display());
    let before = std::time::Instant::now();
    let font = iconfont::build_font(&input, &options)?;
    log::info!("Built {} glyphs in {:.2?}", font.len(), before.elapsed());
    font.save(&output)?;
    println!("SVG font: {}", output.display());
    Ok(())
}

fn rename(args: &ArgMatches) -> Result<(), IconFontError> {
    let input = PathBuf::from(args.get_one::<String>("input").cloned().unwrap_or_default());
    let output = PathBuf::from(args.get_one::<String>("output").cloned().unwrap_or_default());
    let report = iconfont::rename::rename_directory(&input, &output)?;
    println!("Copied {} files to {}", report.copied, output.display());
    for (file, reason) in &report.failures {
        log::error!("{}: {}", file, reason);
    }
    Ok(())
}

fn main() {
    let command = Command::new("iconfont")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build SVG fonts from directories of SVG icons")
        .subcommand_required(true)
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .help("Set the level of verbosity")
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(build_command())
        .subcommand(rename_command());

    let args = command.get_matches();
    let verbosity = args
        .subcommand()
        .map(|(_, sub)| sub.get_count("verbosity"))
        .unwrap_or(0)
        .max(args.get_count("verbosity"));
    env_logger::Builder::new()
        .filter_level(match verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let result = match args.subcommand() {
        Some(("build", sub)) => build(sub),
        Some(("rename", sub)) => rename(sub),
        _ => Ok(()),
    };
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
