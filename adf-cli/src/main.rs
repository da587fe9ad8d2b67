// Command-line interface for adf2adoc
//
// This binary drives the adf-babel library over local files. It never talks to the wiki: the
// page tree, attachment listings and documents are expected to have been downloaded already.
//
// Usage:
//  adf2adoc convert <input.json> [-o out.adoc] [--title T] [--page-mapping FILE] [--attachments FILE]
//  adf2adoc substitute-ids <input.json> --mapping FILE [-o out.json]
//  adf2adoc clamp-widths <input.json> [--max-width N] [-o out.json]
//  adf2adoc linked-pages <input.json> [--base-url URL]
//
// Settings not given on the command line come from adf.toml in the working directory, or from
// the file named by --config, layered over the built-in defaults.

mod inputs;

use adf_babel::publish::{publish, PublishArtifact, PublishSpec};
use adf_babel::{clamp_widths, linked_page_ids, substitute_ids, to_pretty_json, RenderOptions};
use adf_config::{AdfConfig, Loader};
use clap::{Arg, Command, ValueHint};
use serde_json::Value;
use std::fs;

fn build_cli() -> Command {
    Command::new("adf2adoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Atlassian Document Format trees to AsciiDoc")
        .long_about(
            "adf2adoc works on ADF documents downloaded from Confluence.\n\n\
            Commands:\n  \
            - convert:        Render a document as AsciiDoc\n  \
            - substitute-ids: Replace attachment file names with attachment ids\n  \
            - clamp-widths:   Scale down images wider than a maximum width\n  \
            - linked-pages:   List the ids of wiki pages a document links to\n\n\
            Examples:\n  \
            adf2adoc convert page.json --title \"Release Notes\" -o notes.adoc\n  \
            adf2adoc clamp-widths page.json --max-width 800 -o page.json",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an adf.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an ADF document to AsciiDoc")
                .arg(input_arg())
                .arg(output_arg("Output file path (defaults to stdout)"))
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Document title, written as the level 0 heading"),
                )
                .arg(
                    Arg::new("page-mapping")
                        .long("page-mapping")
                        .value_name("FILE")
                        .help("JSON object of page id to {title, path}, for cross-page links")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("attachments")
                        .long("attachments")
                        .value_name("FILE")
                        .help("JSON object of attachment file id to file name")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(base_url_arg())
                .arg(
                    Arg::new("jira-base-url")
                        .long("jira-base-url")
                        .value_name("URL")
                        .help("Issue tracker URL; issue links under it become jira macros")
                        .value_hint(ValueHint::Url),
                )
                .arg(
                    Arg::new("images-dir")
                        .long("images-dir")
                        .value_name("DIR")
                        .help("Value of the :imagesdir: attribute")
                        .value_hint(ValueHint::DirPath),
                ),
        )
        .subcommand(
            Command::new("substitute-ids")
                .about("Replace attachment file names used as media ids with attachment ids")
                .arg(input_arg())
                .arg(
                    Arg::new("mapping")
                        .long("mapping")
                        .value_name("FILE")
                        .help("JSON object of file name to attachment id")
                        .required(true)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(output_arg("Output file path (defaults to stdout)")),
        )
        .subcommand(
            Command::new("clamp-widths")
                .about("Scale down images wider than a maximum width")
                .arg(input_arg())
                .arg(
                    Arg::new("max-width")
                        .long("max-width")
                        .value_name("PIXELS")
                        .help("Maximum image width (defaults to upload.max_image_width)")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(output_arg("Output file path (defaults to stdout)")),
        )
        .subcommand(
            Command::new("linked-pages")
                .about("List the ids of wiki pages linked from a document")
                .arg(input_arg())
                .arg(base_url_arg()),
        )
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input ADF document (JSON)")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg(help: &'static str) -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help(help)
        .value_hint(ValueHint::FilePath)
}

fn base_url_arg() -> Arg {
    Arg::new("base-url")
        .long("base-url")
        .value_name("URL")
        .help("Wiki base URL (defaults to convert.base_url)")
        .value_hint(ValueHint::Url)
}

fn main() {
    env_logger::init();

    let matches = build_cli().get_matches();
    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            apply_convert_overrides(&mut config, sub_matches);
            let args = ConvertArgs {
                input,
                output: sub_matches.get_one::<String>("output").map(|s| s.as_str()),
                title: sub_matches.get_one::<String>("title").map(|s| s.as_str()),
                page_mapping: sub_matches
                    .get_one::<String>("page-mapping")
                    .map(|s| s.as_str()),
                attachments: sub_matches
                    .get_one::<String>("attachments")
                    .map(|s| s.as_str()),
            };
            handle_convert_command(&args, &config);
        }
        Some(("substitute-ids", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let mapping = sub_matches
                .get_one::<String>("mapping")
                .expect("mapping is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_substitute_ids_command(input, mapping, output);
        }
        Some(("clamp-widths", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let max_width = sub_matches
                .get_one::<u64>("max-width")
                .copied()
                .or_else(|| config.upload.max_image_width());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_clamp_widths_command(input, max_width, output);
        }
        Some(("linked-pages", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            if let Some(base_url) = sub_matches.get_one::<String>("base-url") {
                config.convert.base_url = base_url.clone();
            }
            handle_linked_pages_command(input, &config.convert.base_url);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

struct ConvertArgs<'a> {
    input: &'a str,
    output: Option<&'a str>,
    title: Option<&'a str>,
    page_mapping: Option<&'a str>,
    attachments: Option<&'a str>,
}

fn handle_convert_command(args: &ConvertArgs<'_>, config: &AdfConfig) {
    let document = inputs::read_document(args.input);

    let mut options = RenderOptions::from(&config.convert);
    if let Some(path) = args.page_mapping {
        options = options.with_page_mapping(inputs::read_page_mapping(path));
    }
    if let Some(path) = args.attachments {
        options = options.with_attachments(inputs::read_string_map(path));
    }

    let mut spec = PublishSpec::new(&document).with_options(options);
    if let Some(title) = args.title {
        spec = spec.with_title(title);
    }
    if let Some(output) = args.output {
        spec = spec.with_output_path(output);
    }

    let result = publish(spec).unwrap_or_else(|err| {
        eprintln!("Conversion error: {err}");
        std::process::exit(1);
    });

    for (username, id) in &result.mentions {
        log::debug!("mentioned user {username} ({id})");
    }

    match result.artifact {
        PublishArtifact::InMemory(text) => print!("{text}"),
        PublishArtifact::File(path) => log::info!("wrote {}", path.display()),
    }
}

fn handle_substitute_ids_command(input: &str, mapping: &str, output: Option<&str>) {
    let tree = inputs::read_tree(input);
    let filename_to_id = inputs::read_string_map(mapping);
    write_tree(&substitute_ids(&tree, &filename_to_id), output);
}

fn handle_clamp_widths_command(input: &str, max_width: Option<u64>, output: Option<&str>) {
    let tree = inputs::read_tree(input);
    if max_width.is_none() {
        log::info!("no maximum image width configured, leaving widths unchanged");
    }
    write_tree(&clamp_widths(&tree, max_width), output);
}

fn handle_linked_pages_command(input: &str, base_url: &str) {
    if base_url.is_empty() {
        eprintln!("Error: a wiki base URL is required (--base-url or convert.base_url)");
        std::process::exit(1);
    }
    let document = inputs::read_document(input);
    for id in linked_page_ids(&document, base_url) {
        println!("{id}");
    }
}

fn write_tree(tree: &Value, output: Option<&str>) {
    let json = to_pretty_json(tree).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });
    match output {
        Some(path) => fs::write(path, json).unwrap_or_else(|err| {
            eprintln!("Error writing file '{path}': {err}");
            std::process::exit(1);
        }),
        None => print!("{json}"),
    }
}

fn apply_convert_overrides(config: &mut AdfConfig, sub_matches: &clap::ArgMatches) {
    if let Some(base_url) = sub_matches.get_one::<String>("base-url") {
        config.convert.base_url = base_url.clone();
    }
    if let Some(jira_base_url) = sub_matches.get_one::<String>("jira-base-url") {
        config.convert.jira_base_url = jira_base_url.clone();
    }
    if let Some(images_dir) = sub_matches.get_one::<String>("images-dir") {
        config.convert.images_dir = images_dir.clone();
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> AdfConfig {
    let loader = Loader::new().with_optional_file("adf.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
