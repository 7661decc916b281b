use docstore_core::{Row, RowId, Schema};

use crate::parser::command::Command;

/// Parses one REPL line into a [`Command`]
pub fn parse(input: &str) -> Result<Command, String> {
    let input = input.trim();
    let (keyword, rest) = split_word(input);

    match keyword.to_lowercase().as_str() {
        "tables" | "ls" => {
            if !rest.is_empty() {
                return Err("Usage: tables".to_string());
            }
            Ok(Command::Tables)
        }
        "create" => parse_create(rest),
        "show" | "select" => parse_show(rest),
        "insert" => {
            let (table, json) = split_word(rest);
            let table = require_table(table, "insert <table> <json-object>")?;
            Ok(Command::Insert {
                table,
                row: parse_object(json)?,
            })
        }
        "update" => {
            let (table, rest) = split_word(rest);
            let table = require_table(table, "update <table> <id> <json-object>")?;
            let (id, json) = split_word(rest);
            Ok(Command::Update {
                table,
                id: parse_id(id)?,
                patch: parse_object(json)?,
            })
        }
        "delete" => {
            let (table, id) = split_word(rest);
            let table = require_table(table, "delete <table> <id>")?;
            Ok(Command::Delete {
                table,
                id: parse_id(id)?,
            })
        }
        "drop" => {
            let (table, extra) = split_word(rest);
            let table = require_table(table, "drop <table>")?;
            if !extra.is_empty() {
                return Err(format!("Unexpected input after table name: '{extra}'"));
            }
            Ok(Command::Drop { table })
        }
        "" => Err("Empty command".to_string()),
        other => Err(format!("Unknown command '{other}'. Type 'help'")),
    }
}

fn parse_create(rest: &str) -> Result<Command, String> {
    let mut words = rest.split_whitespace();
    let table = require_table(
        words.next().unwrap_or(""),
        "create <table> <field>:<type>[:pk] ...",
    )?;
    let schema = Schema::from_column_defs(words)?;
    Ok(Command::Create { table, schema })
}

fn parse_show(rest: &str) -> Result<Command, String> {
    let mut words = rest.split_whitespace();
    let table = require_table(
        words.next().unwrap_or(""),
        "show <table> [sort <field>] [where <field>=<value>]",
    )?;

    let mut sort_by = None;
    let mut filter = None;
    while let Some(word) = words.next() {
        match word.to_lowercase().as_str() {
            "sort" => {
                let field = words.next().ok_or("Expected field name after 'sort'")?;
                sort_by = Some(field.to_string());
            }
            "where" => {
                let cond = words.next().ok_or("Expected <field>=<value> after 'where'")?;
                let (field, value) = cond
                    .split_once('=')
                    .filter(|(f, _)| !f.is_empty())
                    .ok_or_else(|| format!("Expected <field>=<value> but got '{cond}'"))?;
                filter = Some((field.to_string(), value.to_string()));
            }
            other => return Err(format!("Unexpected '{other}' in show command")),
        }
    }

    Ok(Command::Show {
        table,
        sort_by,
        filter,
    })
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(idx) => (&input[..idx], input[idx..].trim()),
        None => (input, ""),
    }
}

fn require_table(name: &str, usage: &str) -> Result<String, String> {
    if name.is_empty() {
        return Err(format!("Usage: {usage}"));
    }
    Ok(name.to_string())
}

fn parse_id(token: &str) -> Result<RowId, String> {
    token
        .trim()
        .parse::<RowId>()
        .map_err(|_| format!("Expected a row id but got '{token}'"))
}

fn parse_object(json: &str) -> Result<Row, String> {
    if json.is_empty() {
        return Err("Expected a JSON object, e.g. {\"name\": \"ram\"}".to_string());
    }
    match serde_json::from_str::<serde_json::Value>(json) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err("Row must be a JSON object".to_string()),
        Err(e) => Err(format!("Invalid JSON: {e}")),
    }
}
