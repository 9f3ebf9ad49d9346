//! `sass.tree.*` commands over the snippet library.
//!
//! Each command takes a single JSON object argument. Node paths are label
//! arrays from the library root; an empty `folder` is the top level.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tower_lsp::lsp_types::Url;

use sass_assist::{
    Document, ImportFilter, SnippetEdit, SnippetError, SnippetKind, SnippetLibrary, SnippetNode,
};

pub const COMMANDS: &[&str] = &[
    "sass.tree.list",
    "sass.tree.add",
    "sass.tree.addFolder",
    "sass.tree.delete",
    "sass.tree.edit",
    "sass.tree.moveUp",
    "sass.tree.moveDown",
    "sass.tree.copy",
    "sass.tree.cut",
    "sass.tree.paste",
    "sass.tree.insert",
    "sass.tree.addFromFile",
    "sass.tree.recalculatePosition",
];

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid arguments for {command}: {source}")]
    InvalidArguments {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot read document {0}")]
    DocumentUnavailable(Url),

    #[error(transparent)]
    Snippet(#[from] SnippetError),
}

#[derive(Debug, Deserialize)]
struct NodeArgs {
    path: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FolderArgs {
    #[serde(default)]
    folder: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AddArgs {
    #[serde(default)]
    folder: Vec<String>,
    label: String,
    insert: String,
    #[serde(rename = "type", default = "custom_kind")]
    kind: SnippetKind,
    desc: Option<String>,
}

fn custom_kind() -> SnippetKind {
    SnippetKind::Custom
}

#[derive(Debug, Deserialize)]
struct AddFolderArgs {
    #[serde(default)]
    folder: Vec<String>,
    name: String,
}

#[derive(Debug, Deserialize)]
struct EditArgs {
    path: Vec<String>,
    #[serde(flatten)]
    edit: SnippetEdit,
}

#[derive(Debug, Deserialize)]
struct AddFromFileArgs {
    #[serde(default)]
    folder: Vec<String>,
    uri: Url,
    #[serde(default = "all_declarations")]
    filter: ImportFilter,
}

fn all_declarations() -> ImportFilter {
    ImportFilter::All
}

/// Outcome of a command.
#[derive(Debug)]
pub struct CommandOutcome {
    pub result: Value,
    /// The library changed and should be saved
    pub modified: bool,
}

impl CommandOutcome {
    fn read(result: Value) -> Self {
        Self {
            result,
            modified: false,
        }
    }

    fn write(result: Value) -> Self {
        Self {
            result,
            modified: true,
        }
    }
}

/// Run a tree command. `open_document` resolves the file named by
/// `sass.tree.addFromFile`.
pub fn execute(
    library: &mut SnippetLibrary,
    command: &str,
    arguments: Vec<Value>,
    open_document: impl FnOnce(&Url) -> Option<Document>,
) -> Result<CommandOutcome, CommandError> {
    let argument = arguments.into_iter().next().unwrap_or_else(|| json!({}));
    tracing::debug!("Snippet command {} {}", command, argument);

    match command {
        "sass.tree.list" => Ok(CommandOutcome::read(tree_json(library))),
        "sass.tree.add" => {
            let args: AddArgs = parse(command, argument)?;
            let mut node = SnippetNode::item(args.label, args.insert, args.kind);
            node.desc = args.desc;
            library.add(&strs(&args.folder), node)?;
            Ok(CommandOutcome::write(tree_json(library)))
        }
        "sass.tree.addFolder" => {
            let args: AddFolderArgs = parse(command, argument)?;
            library.add_folder(&strs(&args.folder), &args.name)?;
            Ok(CommandOutcome::write(tree_json(library)))
        }
        "sass.tree.delete" => {
            let args: NodeArgs = parse(command, argument)?;
            library.delete(&strs(&args.path))?;
            Ok(CommandOutcome::write(tree_json(library)))
        }
        "sass.tree.edit" => {
            let args: EditArgs = parse(command, argument)?;
            library.edit(&strs(&args.path), args.edit)?;
            Ok(CommandOutcome::write(tree_json(library)))
        }
        "sass.tree.moveUp" => {
            let args: NodeArgs = parse(command, argument)?;
            library.move_up(&strs(&args.path))?;
            Ok(CommandOutcome::write(tree_json(library)))
        }
        "sass.tree.moveDown" => {
            let args: NodeArgs = parse(command, argument)?;
            library.move_down(&strs(&args.path))?;
            Ok(CommandOutcome::write(tree_json(library)))
        }
        "sass.tree.copy" => {
            let args: NodeArgs = parse(command, argument)?;
            library.copy(&strs(&args.path))?;
            Ok(CommandOutcome::read(Value::Null))
        }
        "sass.tree.cut" => {
            let args: NodeArgs = parse(command, argument)?;
            library.cut(&strs(&args.path))?;
            Ok(CommandOutcome::read(Value::Null))
        }
        "sass.tree.paste" => {
            let args: FolderArgs = parse(command, argument)?;
            library.paste(&strs(&args.folder))?;
            Ok(CommandOutcome::write(tree_json(library)))
        }
        "sass.tree.insert" => {
            let args: NodeArgs = parse(command, argument)?;
            let text = library.insert_text(&strs(&args.path))?;
            Ok(CommandOutcome::read(Value::String(text)))
        }
        "sass.tree.addFromFile" => {
            let args: AddFromFileArgs = parse(command, argument)?;
            let doc = open_document(&args.uri)
                .ok_or_else(|| CommandError::DocumentUnavailable(args.uri.clone()))?;
            let added = library.add_from_file(&strs(&args.folder), &doc, args.filter)?;
            Ok(CommandOutcome::write(json!({ "added": added })))
        }
        "sass.tree.recalculatePosition" => {
            library.recalculate_paths();
            Ok(CommandOutcome::write(tree_json(library)))
        }
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

fn parse<T: DeserializeOwned>(command: &str, argument: Value) -> Result<T, CommandError> {
    serde_json::from_value(argument).map_err(|source| CommandError::InvalidArguments {
        command: command.to_string(),
        source,
    })
}

fn tree_json(library: &SnippetLibrary) -> Value {
    serde_json::to_value(library.items()).unwrap_or(Value::Null)
}

fn strs(path: &[String]) -> Vec<&str> {
    path.iter().map(String::as_str).collect()
}
