//! User snippet library.
//!
//! A tree of folders and snippet items persisted as JSON. Nodes are
//! addressed by their label path from the root (`["colors", "brand"]`);
//! labels are unique among siblings. Every node also stores its own path,
//! kept current by [`SnippetLibrary::recalculate_paths`] after structural
//! edits.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

use crate::document::Document;
use crate::error::{Result, SnippetError};
use crate::scan::{records_for, SymbolKind};

type SnippetResult<T> = std::result::Result<T, SnippetError>;

/// Variable values that render as a color swatch
static COLOR_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#[0-9a-fA-F]{3,8}|(?:rgb|hsl)a?\(.*\))$").expect("color value pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnippetKind {
    Folder,
    Color,
    Custom,
    Mixin,
}

/// A folder or snippet item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetNode {
    pub label: String,
    /// Text inserted by the item; empty for folders
    #[serde(default)]
    pub insert: String,
    #[serde(rename = "type")]
    pub kind: SnippetKind,
    /// Labels from the root down to and including this node
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnippetNode>,
}

impl SnippetNode {
    pub fn item(label: impl Into<String>, insert: impl Into<String>, kind: SnippetKind) -> Self {
        Self {
            label: label.into(),
            insert: insert.into(),
            kind,
            path: Vec::new(),
            desc: None,
            children: Vec::new(),
        }
    }

    pub fn folder(label: impl Into<String>) -> Self {
        Self::item(label, "", SnippetKind::Folder)
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn is_folder(&self) -> bool {
        self.kind == SnippetKind::Folder
    }
}

/// Field updates for [`SnippetLibrary::edit`]; `None` leaves a field alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnippetEdit {
    pub label: Option<String>,
    pub insert: Option<String>,
    pub desc: Option<String>,
}

/// Which declarations [`SnippetLibrary::add_from_file`] imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportFilter {
    All,
    Mixin,
    Var,
}

impl ImportFilter {
    fn accepts(self, kind: SymbolKind) -> bool {
        match self {
            ImportFilter::All => true,
            ImportFilter::Mixin => kind == SymbolKind::Mixin,
            ImportFilter::Var => kind == SymbolKind::Variable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipboardMode {
    Copy,
    Cut,
}

#[derive(Debug, Clone)]
struct Clipboard {
    node: SnippetNode,
    source: Vec<String>,
    mode: ClipboardMode,
}

/// The snippet tree plus its clipboard.
#[derive(Debug, Default)]
pub struct SnippetLibrary {
    root: Vec<SnippetNode>,
    clipboard: Option<Clipboard>,
}

impl SnippetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a library file, starting empty when it does not exist yet.
    pub fn load(file: &Path) -> Result<Self> {
        if !file.exists() {
            return Ok(Self::new());
        }
        let bytes = std::fs::read(file)?;
        let mut library = Self {
            root: serde_json::from_slice(&bytes)?,
            clipboard: None,
        };
        library.recalculate_paths();
        tracing::info!("Loaded snippet library from {}", file.display());
        Ok(library)
    }

    pub fn save(&self, file: &Path) -> Result<()> {
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(file, serde_json::to_vec_pretty(&self.root)?)?;
        Ok(())
    }

    /// Top-level nodes.
    pub fn items(&self) -> &[SnippetNode] {
        &self.root
    }

    pub fn get(&self, path: &[&str]) -> Option<&SnippetNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.root.iter().find(|n| n.label == *first)?;
        for label in rest {
            node = node.children.iter().find(|n| n.label == *label)?;
        }
        Some(node)
    }

    /// Add a node under a folder (`&[]` for the top level).
    pub fn add(&mut self, folder: &[&str], node: SnippetNode) -> SnippetResult<()> {
        let siblings = self.children_mut(folder)?;
        if siblings.iter().any(|n| n.label == node.label) {
            return Err(SnippetError::Duplicate {
                name: node.label,
                parent: display_path(folder),
            });
        }
        siblings.push(node);
        self.recalculate_paths();
        Ok(())
    }

    pub fn add_folder(&mut self, folder: &[&str], name: &str) -> SnippetResult<()> {
        self.add(folder, SnippetNode::folder(name))
    }

    /// Remove a node and everything below it.
    pub fn delete(&mut self, path: &[&str]) -> SnippetResult<SnippetNode> {
        let (parent, index) = self.locate(path)?;
        let removed = self.children_mut(parent)?.remove(index);
        self.recalculate_paths();
        Ok(removed)
    }

    pub fn edit(&mut self, path: &[&str], edit: SnippetEdit) -> SnippetResult<()> {
        let (parent, index) = self.locate(path)?;

        if let Some(label) = &edit.label {
            let siblings = self.children_mut(parent)?;
            if siblings
                .iter()
                .enumerate()
                .any(|(i, n)| i != index && n.label == *label)
            {
                return Err(SnippetError::Duplicate {
                    name: label.clone(),
                    parent: display_path(parent),
                });
            }
        }

        let node = &mut self.children_mut(parent)?[index];
        if let Some(label) = edit.label {
            node.label = label;
        }
        if let Some(insert) = edit.insert {
            node.insert = insert;
        }
        if let Some(desc) = edit.desc {
            node.desc = Some(desc).filter(|d| !d.is_empty());
        }
        self.recalculate_paths();
        Ok(())
    }

    /// Swap a node with its previous sibling; the first node stays put.
    pub fn move_up(&mut self, path: &[&str]) -> SnippetResult<()> {
        let (parent, index) = self.locate(path)?;
        if index > 0 {
            self.children_mut(parent)?.swap(index - 1, index);
        }
        Ok(())
    }

    /// Swap a node with its next sibling; the last node stays put.
    pub fn move_down(&mut self, path: &[&str]) -> SnippetResult<()> {
        let (parent, index) = self.locate(path)?;
        let siblings = self.children_mut(parent)?;
        if index + 1 < siblings.len() {
            siblings.swap(index, index + 1);
        }
        Ok(())
    }

    pub fn copy(&mut self, path: &[&str]) -> SnippetResult<()> {
        self.fill_clipboard(path, ClipboardMode::Copy)
    }

    /// Mark a node for moving; it stays in place until pasted.
    pub fn cut(&mut self, path: &[&str]) -> SnippetResult<()> {
        self.fill_clipboard(path, ClipboardMode::Cut)
    }

    /// Paste the clipboard into a folder. Copies get a unique label among
    /// their new siblings; a cut node moves and clears the clipboard.
    pub fn paste(&mut self, folder: &[&str]) -> SnippetResult<()> {
        let clipboard = self.clipboard.clone().ok_or(SnippetError::EmptyClipboard)?;

        if clipboard.mode == ClipboardMode::Cut && folder.starts_with(&as_strs(&clipboard.source)) {
            return Err(SnippetError::PasteIntoSelf(clipboard.node.label));
        }
        self.children_mut(folder)?;

        let mut node = clipboard.node;
        if clipboard.mode == ClipboardMode::Cut {
            self.delete(&as_strs(&clipboard.source))?;
            self.clipboard = None;
        }

        let siblings = self.children_mut(folder)?;
        node.label = unique_label(siblings, &node.label);
        siblings.push(node);
        self.recalculate_paths();
        Ok(())
    }

    /// Text inserted for a node. A folder inserts every item below it,
    /// one per line.
    pub fn insert_text(&self, path: &[&str]) -> SnippetResult<String> {
        let node = self
            .get(path)
            .ok_or_else(|| SnippetError::NotFound(display_path(path)))?;
        let mut lines = Vec::new();
        collect_inserts(node, &mut lines);
        Ok(lines.join("\n"))
    }

    /// Rewrite every node's stored path from its position in the tree.
    pub fn recalculate_paths(&mut self) {
        fn walk(nodes: &mut [SnippetNode], prefix: &[String]) {
            for node in nodes {
                node.path = prefix.to_vec();
                node.path.push(node.label.clone());
                let path = node.path.clone();
                walk(&mut node.children, &path);
            }
        }
        walk(&mut self.root, &[]);
    }

    /// Import a stylesheet's declarations as a folder named after the
    /// file. An existing folder of that name is replaced. Returns the
    /// number of snippets added.
    pub fn add_from_file(
        &mut self,
        folder: &[&str],
        doc: &Document,
        filter: ImportFilter,
    ) -> SnippetResult<usize> {
        let items: Vec<SnippetNode> = records_for(doc)
            .into_values()
            .filter(|record| filter.accepts(record.symbol_type))
            .map(|record| {
                let kind = match record.symbol_type {
                    SymbolKind::Mixin => SnippetKind::Mixin,
                    SymbolKind::Variable if is_color_declaration(&record.detail) => {
                        SnippetKind::Color
                    }
                    SymbolKind::Variable => SnippetKind::Custom,
                };
                SnippetNode::item(record.title, record.insert, kind).with_desc(record.detail)
            })
            .collect();
        let added = items.len();

        let name = doc.basename();
        let siblings = self.children_mut(folder)?;
        siblings.retain(|n| !(n.is_folder() && n.label == name));
        siblings.push(SnippetNode {
            children: items,
            ..SnippetNode::folder(name)
        });
        self.recalculate_paths();

        tracing::debug!("Imported {} snippets from {}", added, doc.path.display());
        Ok(added)
    }

    fn fill_clipboard(&mut self, path: &[&str], mode: ClipboardMode) -> SnippetResult<()> {
        let node = self
            .get(path)
            .ok_or_else(|| SnippetError::NotFound(display_path(path)))?
            .clone();
        self.clipboard = Some(Clipboard {
            node,
            source: path.iter().map(|s| s.to_string()).collect(),
            mode,
        });
        Ok(())
    }

    /// Parent folder path and sibling index of a node.
    fn locate<'p>(&self, path: &'p [&'p str]) -> SnippetResult<(&'p [&'p str], usize)> {
        let (label, parent) = path
            .split_last()
            .ok_or_else(|| SnippetError::NotFound(String::new()))?;
        let siblings = if parent.is_empty() {
            &self.root
        } else {
            &self
                .get(parent)
                .ok_or_else(|| SnippetError::NotFound(display_path(parent)))?
                .children
        };
        let index = siblings
            .iter()
            .position(|n| n.label == *label)
            .ok_or_else(|| SnippetError::NotFound(display_path(path)))?;
        Ok((parent, index))
    }

    fn children_mut(&mut self, folder: &[&str]) -> SnippetResult<&mut Vec<SnippetNode>> {
        let mut children = &mut self.root;
        for (depth, label) in folder.iter().enumerate() {
            let node = children
                .iter_mut()
                .find(|n| n.label == *label)
                .ok_or_else(|| SnippetError::NotFound(display_path(&folder[..=depth])))?;
            if !node.is_folder() {
                return Err(SnippetError::NotAFolder(display_path(&folder[..=depth])));
            }
            children = &mut node.children;
        }
        Ok(children)
    }
}

fn collect_inserts(node: &SnippetNode, lines: &mut Vec<String>) {
    if node.is_folder() {
        for child in &node.children {
            collect_inserts(child, lines);
        }
    } else {
        lines.push(node.insert.clone());
    }
}

fn unique_label(siblings: &[SnippetNode], label: &str) -> String {
    let taken = |candidate: &str| siblings.iter().any(|n| n.label == candidate);
    if !taken(label) {
        return label.to_string();
    }
    let mut candidate = format!("{} copy", label);
    let mut n = 2;
    while taken(&candidate) {
        candidate = format!("{} copy {}", label, n);
        n += 1;
    }
    candidate
}

fn is_color_declaration(detail: &str) -> bool {
    detail
        .split_once(':')
        .map(|(_, value)| COLOR_VALUE_RE.is_match(value.trim().trim_end_matches(';').trim()))
        .unwrap_or(false)
}

fn display_path(path: &[&str]) -> String {
    path.join("/")
}

fn as_strs(path: &[String]) -> Vec<&str> {
    path.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn library() -> SnippetLibrary {
        let mut lib = SnippetLibrary::new();
        lib.add_folder(&[], "colors").unwrap();
        lib.add(&["colors"], SnippetNode::item("brand", "#c69", SnippetKind::Color))
            .unwrap();
        lib.add(&["colors"], SnippetNode::item("ink", "#333", SnippetKind::Color))
            .unwrap();
        lib.add(&[], SnippetNode::item("clearfix", "+clearfix", SnippetKind::Custom))
            .unwrap();
        lib
    }

    fn labels(nodes: &[SnippetNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.label.as_str()).collect()
    }

    #[test]
    fn test_paths_follow_tree_position() {
        let lib = library();
        assert_eq!(lib.get(&["colors", "ink"]).unwrap().path, vec!["colors", "ink"]);
        assert_eq!(lib.get(&["clearfix"]).unwrap().path, vec!["clearfix"]);
    }

    #[test]
    fn test_duplicate_and_non_folder_rejected() {
        let mut lib = library();
        assert_eq!(
            lib.add_folder(&[], "colors"),
            Err(SnippetError::Duplicate {
                name: "colors".into(),
                parent: String::new()
            })
        );
        assert_eq!(
            lib.add(&["clearfix"], SnippetNode::folder("x")),
            Err(SnippetError::NotAFolder("clearfix".into()))
        );
        assert_eq!(
            lib.delete(&["nope"]),
            Err(SnippetError::NotFound("nope".into()))
        );
    }

    #[test]
    fn test_move_up_and_down() {
        let mut lib = library();
        lib.move_up(&["colors", "ink"]).unwrap();
        assert_eq!(labels(&lib.get(&["colors"]).unwrap().children), vec!["ink", "brand"]);
        lib.move_up(&["colors", "ink"]).unwrap();
        assert_eq!(labels(&lib.get(&["colors"]).unwrap().children), vec!["ink", "brand"]);
        lib.move_down(&["colors"]).unwrap();
        assert_eq!(labels(lib.items()), vec!["clearfix", "colors"]);
    }

    #[test]
    fn test_edit_renames_and_updates_paths() {
        let mut lib = library();
        lib.edit(
            &["colors", "ink"],
            SnippetEdit {
                label: Some("text".into()),
                desc: Some("Body text".into()),
                ..SnippetEdit::default()
            },
        )
        .unwrap();
        let node = lib.get(&["colors", "text"]).unwrap();
        assert_eq!(node.path, vec!["colors", "text"]);
        assert_eq!(node.desc.as_deref(), Some("Body text"));
        assert_eq!(node.insert, "#333");

        assert!(lib
            .edit(
                &["colors", "text"],
                SnippetEdit {
                    label: Some("brand".into()),
                    ..SnippetEdit::default()
                }
            )
            .is_err());
    }

    #[test]
    fn test_copy_paste_makes_unique_label() {
        let mut lib = library();
        lib.copy(&["colors", "brand"]).unwrap();
        lib.paste(&["colors"]).unwrap();
        lib.paste(&["colors"]).unwrap();
        assert_eq!(
            labels(&lib.get(&["colors"]).unwrap().children),
            vec!["brand", "ink", "brand copy", "brand copy 2"]
        );
    }

    #[test]
    fn test_cut_paste_moves_node() {
        let mut lib = library();
        lib.cut(&["clearfix"]).unwrap();
        lib.paste(&["colors"]).unwrap();
        assert_eq!(labels(lib.items()), vec!["colors"]);
        assert_eq!(
            lib.get(&["colors", "clearfix"]).unwrap().path,
            vec!["colors", "clearfix"]
        );
        assert_eq!(lib.paste(&[]), Err(SnippetError::EmptyClipboard));
    }

    #[test]
    fn test_cut_folder_into_itself_rejected() {
        let mut lib = library();
        lib.add_folder(&["colors"], "dark").unwrap();
        lib.cut(&["colors"]).unwrap();
        assert_eq!(
            lib.paste(&["colors", "dark"]),
            Err(SnippetError::PasteIntoSelf("colors".into()))
        );
        assert!(lib.get(&["colors"]).is_some());
    }

    #[test]
    fn test_folder_insert_joins_items() {
        let lib = library();
        assert_eq!(lib.insert_text(&["colors"]).unwrap(), "#c69\n#333");
        assert_eq!(lib.insert_text(&["clearfix"]).unwrap(), "+clearfix");
    }

    #[test]
    fn test_add_from_file_filters() {
        let doc = Document::new(
            "/w/_theme.sass",
            "$brand: #c69\n$gap: 4px\n=card($pad)\n  padding: $pad\n",
        );

        let mut lib = SnippetLibrary::new();
        assert_eq!(lib.add_from_file(&[], &doc, ImportFilter::All).unwrap(), 3);
        let folder = lib.get(&["_theme.sass"]).unwrap();
        let kinds: Vec<SnippetKind> = folder.children.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![SnippetKind::Color, SnippetKind::Custom, SnippetKind::Mixin]
        );

        assert_eq!(lib.add_from_file(&[], &doc, ImportFilter::Mixin).unwrap(), 1);
        assert_eq!(lib.items().len(), 1);
        assert_eq!(lib.insert_text(&["_theme.sass"]).unwrap(), "card($1)");

        assert_eq!(lib.add_from_file(&[], &doc, ImportFilter::Var).unwrap(), 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("snippets.json");
        let lib = library();
        lib.save(&file).unwrap();

        let loaded = SnippetLibrary::load(&file).unwrap();
        assert_eq!(loaded.items(), lib.items());
        assert!(SnippetLibrary::load(&dir.path().join("missing.json"))
            .unwrap()
            .items()
            .is_empty());
    }
}
