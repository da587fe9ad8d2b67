// Reading of the JSON files the commands consume. Every failure ends the process with a
// message on stderr.

use adf_babel::{Node, PageInfo};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;

fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn parse<T: serde::de::DeserializeOwned>(path: &str, what: &str) -> T {
    serde_json::from_str(&read_source(path)).unwrap_or_else(|e| {
        eprintln!("Error parsing {what} '{path}': {e}");
        std::process::exit(1);
    })
}

/// The raw JSON tree, for the rewrite passes.
pub fn read_tree(path: &str) -> Value {
    parse(path, "document")
}

pub fn read_document(path: &str) -> Node {
    let tree = read_tree(path);
    Node::from_value(tree).unwrap_or_else(|e| {
        eprintln!("Error reading document '{path}': {e}");
        std::process::exit(1);
    })
}

pub fn read_page_mapping(path: &str) -> HashMap<String, PageInfo> {
    parse(path, "page mapping")
}

pub fn read_string_map(path: &str) -> HashMap<String, String> {
    parse(path, "mapping")
}
