//! Command implementations for the CLI.

use super::args::*;
use crate::backend::{ElasticBackend, QueryStringBuilder, SortField};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::schema::SchemaDefinition;
use serde_json::{json, Value};
use std::path::Path;
use tracing::info;

/// Execute a CLI command, returning the JSON document to print
pub fn execute_command(args: &BackendArgs, settings: &Settings) -> Result<Value> {
    match &args.command {
        Command::Schema(schema_args) => build_schema(schema_args, settings),
        Command::Query(query_args) => build_query(query_args, settings),
    }
}

/// Compile a schema definition file
fn build_schema(args: &SchemaArgs, settings: &Settings) -> Result<Value> {
    info!("Compiling schema from: {}", args.schema_file.display());
    let definition = SchemaDefinition::from_file(&args.schema_file)?;
    let fields = definition.resolve();

    let backend = ElasticBackend::new(settings, QueryStringBuilder::default());
    let schema = backend.build_schema(fields.iter().map(|(name, field)| (name.as_str(), field)))?;

    Ok(json!({
        "content_field": schema.content_field,
        "mapping": backend.mapping_document(&schema)?
    }))
}

/// Build a search request body
fn build_query(args: &QueryArgs, settings: &Settings) -> Result<Value> {
    let backend = match &args.schema {
        Some(path) => {
            let definition = SchemaDefinition::from_file(path)?;
            let fields = definition.resolve();
            let backend = ElasticBackend::new(settings, QueryStringBuilder::default());
            let schema =
                backend.build_schema(fields.iter().map(|(name, field)| (name.as_str(), field)))?;
            ElasticBackend::for_schema(settings, &schema)
        }
        None => ElasticBackend::new(
            settings,
            QueryStringBuilder::new(
                crate::backend::DEFAULT_CONTENT_FIELD,
                settings.backend.clone(),
            ),
        ),
    };

    let mut query = backend
        .query(args.query.clone())
        .with_fields(args.fields.iter().cloned())
        .with_highlight(args.highlight);

    query = match args.end {
        Some(end) => query.with_range(args.start, end),
        None => query.with_start(args.start),
    };
    for sort in &args.sort {
        query = query.with_sort(SortField::parse(sort));
    }
    for facet in &args.facet {
        query = query.with_facet(facet.clone());
    }

    if args.nested_terms.is_empty() {
        if args.nested_path.is_some() || args.nested_field.is_some() {
            return Err(Error::invalid_query_spec(
                "--nested-path/--nested-field given without --nested-terms",
            ));
        }
    } else {
        let path = args
            .nested_path
            .clone()
            .unwrap_or_else(|| settings.nested.default_path.clone());
        let field = args
            .nested_field
            .clone()
            .unwrap_or_else(|| settings.nested.default_field.clone());
        query = query.nested_at(path, field, args.nested_terms.iter().cloned())?;
    }

    if let Some(path) = &args.custom_query {
        query = query.custom_query(read_json(path)?);
    }

    Ok(backend.build_search_kwargs(&query)?.into_value())
}

fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const SCHEMA: &str = "fields:\n  - name: text\n    document: true\n  - name: tags\n    preset: tags\n";

    fn parse(argv: &[&str]) -> BackendArgs {
        BackendArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_schema_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.yml");
        std::fs::write(&path, SCHEMA).unwrap();

        let args = parse(&["elastic-backend", "schema", path.to_str().unwrap()]);
        let output = execute_command(&args, &Settings::default()).unwrap();

        assert_eq!(output["content_field"], "text");
        assert_eq!(
            output["mapping"]["modelresult"]["properties"]["tags"]["type"],
            "nested"
        );
    }

    #[test]
    fn test_query_command_with_nested_terms() {
        let args = parse(&[
            "elastic-backend",
            "query",
            "--q",
            "rust",
            "--end",
            "10",
            "--nested-terms",
            "a,b",
        ]);
        let output = execute_command(&args, &Settings::default()).unwrap();

        assert_eq!(output["size"], 10);
        assert_eq!(
            output["query"]["nested"]["query"]["function_score"]["query"]["terms"]["tag"],
            json!(["a", "b"])
        );
    }

    #[test]
    fn test_query_command_custom_query() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(&path, r#"{"match_all": {}}"#).unwrap();

        let args = parse(&[
            "elastic-backend",
            "query",
            "--custom-query",
            path.to_str().unwrap(),
            "--sort",
            "-pub_date",
        ]);
        let output = execute_command(&args, &Settings::default()).unwrap();

        assert_eq!(output["query"], json!({"match_all": {}}));
        assert_eq!(output["sort"], json!([{"pub_date": {"order": "desc"}}]));
    }

    #[test]
    fn test_descending_sort_list() {
        let args = parse(&["elastic-backend", "query", "--sort", "-pub_date,title"]);
        let output = execute_command(&args, &Settings::default()).unwrap();

        assert_eq!(
            output["sort"],
            json!([{"pub_date": {"order": "desc"}}, {"title": {"order": "asc"}}])
        );
    }

    #[test]
    fn test_start_without_end() {
        let args = parse(&["elastic-backend", "query", "--start", "20"]);
        let output = execute_command(&args, &Settings::default()).unwrap();

        assert_eq!(output["from"], 20);
        assert!(output.get("size").is_none());
    }

    #[test]
    fn test_partial_nested_arguments_rejected() {
        let args = parse(&["elastic-backend", "query", "--nested-path", "tags"]);
        let result = execute_command(&args, &Settings::default());
        assert!(matches!(result, Err(Error::InvalidQuerySpec(_))));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(parse(&["elastic-backend", "-v", "query"]).log_level(), "debug");
        assert_eq!(parse(&["elastic-backend", "--quiet", "query"]).log_level(), "warn");
        assert_eq!(parse(&["elastic-backend", "query"]).log_level(), "info");
    }
}
