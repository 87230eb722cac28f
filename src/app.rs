use std::collections::HashMap;
use std::iter;

use crate::event::Input;
use crate::fs::node::{Node, NodeKey};
use crate::render::layout::{flat, layout, Row};
use crate::render::{Annotate, Decoration, RenderOptions};
use crate::theme::ThemeColors;

/// Browser input mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Navigation,
    SearchInput,
}

/// Terminal size from the last resize.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// Title line plus help line.
const CHROME_LINES: usize = 2;

/// Interactive browser state.
///
/// The tree itself is never modified; expansion, selection and the search
/// filter are overlays keyed by [`NodeKey`].
pub struct App {
    pub root: Node,
    pub expanded: HashMap<NodeKey, bool>,
    pub selected: NodeKey,
    pub query: String,
    /// Search result in depth-first order. Empty means no filter.
    pub filtered: Vec<NodeKey>,
    pub mode: Mode,
    pub viewport: Viewport,
    pub scroll_offset: usize,
    pub should_quit: bool,
    pub annotate: Annotate,
    pub colors: ThemeColors,
}

impl App {
    /// Create a browser over `root` with only the root expanded.
    pub fn new(root: Node, annotate: Annotate, colors: ThemeColors) -> Self {
        let root_key = root.key();
        let mut expanded = HashMap::new();
        expanded.insert(root_key.clone(), true);
        Self {
            root,
            expanded,
            selected: root_key,
            query: String::new(),
            filtered: Vec::new(),
            mode: Mode::Navigation,
            viewport: Viewport::default(),
            scroll_offset: 0,
            should_quit: false,
            annotate,
            colors,
        }
    }

    pub fn is_expanded(&self, node: &Node) -> bool {
        self.expanded.get(&node.key()).copied().unwrap_or(false)
    }

    /// Rows currently on display: the search result as a flat list when a
    /// filter is active, else the tree pruned at collapsed directories.
    pub fn visible_rows(&self) -> Vec<Row<'_>> {
        if !self.filtered.is_empty() {
            return flat(self.filtered_nodes());
        }
        let options = RenderOptions {
            show_root: true,
            decoration: Decoration::BoxDrawing,
            annotate: self.annotate,
            summary: false,
        };
        layout(&self.root, &options, &|node| self.is_expanded(node))
    }

    /// Index of the selected row within `rows`.
    pub fn selected_index(&self, rows: &[Row]) -> Option<usize> {
        rows.iter().position(|r| r.node.has_key(&self.selected))
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.root.find(&self.selected)
    }

    /// Lines available for tree rows.
    pub fn body_height(&self) -> usize {
        let chrome = CHROME_LINES + usize::from(self.mode == Mode::SearchInput);
        (self.viewport.height as usize).saturating_sub(chrome)
    }

    /// Apply one input, then repair the selection and scroll position.
    pub fn handle(&mut self, input: Input) {
        match (self.mode, input) {
            (_, Input::Resize { width, height }) => {
                self.viewport = Viewport { width, height };
            }

            (Mode::Navigation, Input::Quit) => self.quit(),
            (Mode::Navigation, Input::StartSearch) => {
                self.mode = Mode::SearchInput;
                self.query.clear();
            }
            // Selection moves repair scroll themselves.
            (Mode::Navigation, Input::Down) => return self.select_next(),
            (Mode::Navigation, Input::Up) => return self.select_previous(),
            (Mode::Navigation, Input::Top) => return self.select_first(),
            (Mode::Navigation, Input::Bottom) => return self.select_last(),
            (Mode::Navigation, Input::Enter) => self.toggle_selected(),
            (Mode::Navigation, Input::Char(_) | Input::Backspace) => {}

            (Mode::SearchInput, Input::Quit) => {
                self.query.clear();
                self.mode = Mode::Navigation;
            }
            (Mode::SearchInput, Input::Enter) => self.commit_search(),
            (Mode::SearchInput, Input::Char(c)) => self.query.push(c),
            (Mode::SearchInput, Input::Backspace) => {
                self.query.pop();
            }
            (
                Mode::SearchInput,
                Input::StartSearch | Input::Down | Input::Up | Input::Top | Input::Bottom,
            ) => {}
        }
        self.sync_selection();
    }

    /// Quit the browser.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Move selection down by one row, stopping at the last.
    pub fn select_next(&mut self) {
        self.move_selection(|index, len| (index + 1).min(len - 1));
    }

    /// Move selection up by one row, stopping at the first.
    pub fn select_previous(&mut self) {
        self.move_selection(|index, _| index.saturating_sub(1));
    }

    pub fn select_first(&mut self) {
        self.move_selection(|_, _| 0);
    }

    pub fn select_last(&mut self) {
        self.move_selection(|_, len| len - 1);
    }

    /// Move the selection with one row build, then keep it in the window.
    fn move_selection(&mut self, step: impl Fn(usize, usize) -> usize) {
        let (target, index, len) = {
            let rows = self.visible_rows();
            if rows.is_empty() {
                return;
            }
            let current = self.selected_index(&rows).unwrap_or(0);
            let index = step(current, rows.len());
            (rows[index].node.key(), index, rows.len())
        };
        self.selected = target;
        self.update_scroll(index, len);
    }

    /// Flip the expansion of the selected directory. Files are left alone.
    pub fn toggle_selected(&mut self) {
        let is_dir = self.selected_node().is_some_and(Node::is_dir);
        if !is_dir {
            return;
        }
        let entry = self.expanded.entry(self.selected.clone()).or_insert(false);
        *entry = !*entry;
    }

    /// Replace the filter with every node whose name contains the query,
    /// case-insensitively, regardless of expansion. An empty query clears it.
    fn commit_search(&mut self) {
        self.mode = Mode::Navigation;
        if self.query.is_empty() {
            self.filtered.clear();
            return;
        }
        let needle = self.query.to_lowercase();
        self.filtered = self
            .all_nodes()
            .filter(|n| n.name.to_lowercase().contains(&needle))
            .map(Node::key)
            .collect();
        tracing::debug!(query = %self.query, matches = self.filtered.len(), "search committed");
    }

    /// Root followed by every descendant, depth-first.
    fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        iter::once(&self.root).chain(self.root.descendants())
    }

    /// Nodes named by the filter. The filter is stored in depth-first order,
    /// so one merge pass over the tree resolves it.
    fn filtered_nodes(&self) -> Vec<&Node> {
        let mut pending = self.filtered.iter().peekable();
        let mut nodes = Vec::with_capacity(self.filtered.len());
        for node in self.all_nodes() {
            let Some(key) = pending.peek() else {
                break;
            };
            if node.has_key(key) {
                nodes.push(node);
                pending.next();
            }
        }
        nodes
    }

    /// Keep the selection on a visible row and inside the body window.
    fn sync_selection(&mut self) {
        let (index, len, first) = {
            let rows = self.visible_rows();
            (
                self.selected_index(&rows),
                rows.len(),
                rows.first().map(|r| r.node.key()),
            )
        };
        let index = match index {
            Some(i) => i,
            None => {
                if let Some(key) = first {
                    self.selected = key;
                }
                0
            }
        };
        self.update_scroll(index, len);
    }

    fn update_scroll(&mut self, selected: usize, len: usize) {
        let height = self.body_height();
        if height == 0 {
            self.scroll_offset = selected;
            return;
        }
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + height {
            self.scroll_offset = selected + 1 - height;
        }
        self.scroll_offset = self.scroll_offset.min(len.saturating_sub(height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::node::NodeKind;
    use crate::fs::walker::{walk, WalkOptions};
    use crate::theme;
    use std::fs::{self, File};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        File::create(dir.path().join("alpha").join("inner.txt")).unwrap();
        File::create(dir.path().join("alpha").join("Notes.md")).unwrap();
        fs::create_dir(dir.path().join("beta")).unwrap();
        File::create(dir.path().join("beta").join("deep.rs")).unwrap();
        File::create(dir.path().join("file_a.txt")).unwrap();
        File::create(dir.path().join("file_b.rs")).unwrap();
        let root = walk(dir.path(), WalkOptions::default()).unwrap();
        let mut app = App::new(root, Annotate::default(), theme::dark_theme());
        app.handle(Input::Resize {
            width: 80,
            height: 24,
        });
        (dir, app)
    }

    fn visible_names(app: &App) -> Vec<String> {
        app.visible_rows()
            .iter()
            .map(|r| r.node.name.clone())
            .collect()
    }

    fn selected_name(app: &App) -> String {
        app.selected.name.clone()
    }

    fn type_query(app: &mut App, query: &str) {
        app.handle(Input::StartSearch);
        for c in query.chars() {
            app.handle(Input::Char(c));
        }
    }

    #[test]
    fn initial_state_shows_root_children_only() {
        let (dir, app) = setup_app();
        let root_name = dir.path().file_name().unwrap().to_string_lossy().to_string();
        assert_eq!(
            visible_names(&app),
            vec![root_name.clone(), "alpha".into(), "beta".into(), "file_a.txt".into(), "file_b.rs".into()]
        );
        assert_eq!(selected_name(&app), root_name);
        assert_eq!(app.mode, Mode::Navigation);
        assert!(app.filtered.is_empty());
    }

    #[test]
    fn select_next_moves_down() {
        let (_dir, mut app) = setup_app();
        app.handle(Input::Down);
        assert_eq!(selected_name(&app), "alpha");
    }

    #[test]
    fn select_next_clamps_at_end() {
        let (_dir, mut app) = setup_app();
        app.handle(Input::Bottom);
        assert_eq!(selected_name(&app), "file_b.rs");
        app.handle(Input::Down);
        assert_eq!(selected_name(&app), "file_b.rs");
    }

    #[test]
    fn select_previous_clamps_at_start() {
        let (_dir, mut app) = setup_app();
        let root = selected_name(&app);
        app.handle(Input::Up);
        assert_eq!(selected_name(&app), root);
        app.handle(Input::Down);
        app.handle(Input::Down);
        app.handle(Input::Up);
        assert_eq!(selected_name(&app), "alpha");
        app.handle(Input::Top);
        assert_eq!(selected_name(&app), root);
    }

    #[test]
    fn expanding_reveals_exactly_the_children() {
        let (_dir, mut app) = setup_app();
        let before = app.visible_rows().len();
        app.handle(Input::Down); // alpha
        app.handle(Input::Enter);
        assert!(app.expanded[&app.selected]);
        assert_eq!(app.visible_rows().len(), before + 2);
        assert_eq!(
            visible_names(&app)[1..4],
            ["alpha".to_string(), "Notes.md".to_string(), "inner.txt".to_string()]
        );
    }

    #[test]
    fn expanding_restores_previously_expanded_descendants() {
        let mut root = Node::new("r", "/", NodeKind::Directory);
        let mut outer = Node::new("outer", "/r", NodeKind::Directory);
        let mut inner = Node::new("inner", "/r/outer", NodeKind::Directory);
        inner.push_child(Node::new("x", "/r/outer/inner", NodeKind::File));
        inner.push_child(Node::new("y", "/r/outer/inner", NodeKind::File));
        outer.push_child(inner);
        root.push_child(outer);

        let mut app = App::new(root, Annotate::default(), theme::dark_theme());
        app.expanded.insert(
            NodeKey {
                dir_path: "/r/outer".into(),
                name: "inner".into(),
            },
            true,
        );
        let before = app.visible_rows().len();
        app.handle(Input::Down); // outer
        app.handle(Input::Enter);
        // inner plus its two already-expanded children.
        assert_eq!(app.visible_rows().len(), before + 3);
    }

    #[test]
    fn collapsing_hides_the_subtree() {
        let (_dir, mut app) = setup_app();
        let before = app.visible_rows().len();
        app.handle(Input::Down);
        app.handle(Input::Enter);
        app.handle(Input::Enter);
        assert_eq!(app.visible_rows().len(), before);
        assert_eq!(selected_name(&app), "alpha");
    }

    #[test]
    fn enter_on_file_does_nothing() {
        let (_dir, mut app) = setup_app();
        app.handle(Input::Bottom);
        let before = app.visible_rows().len();
        app.handle(Input::Enter);
        assert_eq!(app.visible_rows().len(), before);
        assert!(!app.expanded.contains_key(&app.selected));
    }

    #[test]
    fn collapsing_root_shows_only_root() {
        let (_dir, mut app) = setup_app();
        app.handle(Input::Enter);
        assert_eq!(app.visible_rows().len(), 1);
    }

    #[test]
    fn quit_sets_flag() {
        let (_dir, mut app) = setup_app();
        assert!(!app.should_quit);
        app.handle(Input::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn search_editing() {
        let (_dir, mut app) = setup_app();
        type_query(&mut app, "qx");
        assert_eq!(app.mode, Mode::SearchInput);
        assert_eq!(app.query, "qx");
        assert!(!app.should_quit);
        app.handle(Input::Backspace);
        app.handle(Input::Backspace);
        app.handle(Input::Backspace);
        assert_eq!(app.query, "");
        // Navigation inputs are ignored while typing.
        app.handle(Input::Down);
        assert_eq!(app.mode, Mode::SearchInput);
    }

    #[test]
    fn single_match_search_yields_that_node() {
        let (_dir, mut app) = setup_app();
        type_query(&mut app, "NOTES");
        app.handle(Input::Enter);
        assert_eq!(app.mode, Mode::Navigation);
        assert_eq!(app.filtered.len(), 1);
        assert_eq!(app.filtered[0].name, "Notes.md");
        assert_eq!(visible_names(&app), vec!["Notes.md"]);
        // The old selection is gone, so it snaps to the only row.
        assert_eq!(selected_name(&app), "Notes.md");
    }

    #[test]
    fn search_ignores_expansion_and_keeps_depth_first_order() {
        let (_dir, mut app) = setup_app();
        type_query(&mut app, ".rs");
        app.handle(Input::Enter);
        assert_eq!(visible_names(&app), vec!["deep.rs", "file_b.rs"]);
        let rows = app.visible_rows();
        assert!(rows.iter().all(|r| r.connector.is_empty() && r.prefix.is_empty()));
    }

    #[test]
    fn cancelling_search_keeps_previous_filter() {
        let (_dir, mut app) = setup_app();
        type_query(&mut app, "inner");
        app.handle(Input::Enter);
        type_query(&mut app, "beta");
        app.handle(Input::Quit);
        assert_eq!(app.mode, Mode::Navigation);
        assert!(app.query.is_empty());
        assert!(!app.should_quit);
        assert_eq!(visible_names(&app), vec!["inner.txt"]);
    }

    #[test]
    fn empty_commit_clears_filter() {
        let (_dir, mut app) = setup_app();
        type_query(&mut app, "inner");
        app.handle(Input::Enter);
        app.handle(Input::StartSearch);
        app.handle(Input::Enter);
        assert!(app.filtered.is_empty());
        assert_eq!(app.visible_rows().len(), 5);
    }

    #[test]
    fn resize_only_updates_viewport() {
        let (_dir, mut app) = setup_app();
        app.handle(Input::Down);
        app.handle(Input::Resize {
            width: 120,
            height: 40,
        });
        assert_eq!(
            app.viewport,
            Viewport {
                width: 120,
                height: 40
            }
        );
        assert_eq!(selected_name(&app), "alpha");
        assert_eq!(app.body_height(), 38);
    }

    #[test]
    fn scroll_follows_selection() {
        let mut root = Node::new("r", "/", NodeKind::Directory);
        for i in 0..20 {
            root.push_child(Node::new(format!("f{i:02}"), "/r", NodeKind::File));
        }
        let mut app = App::new(root, Annotate::default(), theme::dark_theme());
        app.handle(Input::Resize {
            width: 40,
            height: 7,
        });
        assert_eq!(app.body_height(), 5);
        for _ in 0..6 {
            app.handle(Input::Down);
        }
        assert_eq!(selected_name(&app), "f05");
        // Row 6 of 21 visible in a five-line window.
        assert_eq!(app.scroll_offset, 2);
        app.handle(Input::Top);
        assert_eq!(app.scroll_offset, 0);
        app.handle(Input::Bottom);
        assert_eq!(app.scroll_offset, 16);
    }

    #[test]
    fn filtered_rows_resolve_each_key_in_tree_order() {
        let mut root = Node::new("r", "/", NodeKind::Directory);
        let mut a = Node::new("a", "/r", NodeKind::Directory);
        a.push_child(Node::new("mod.rs", "/r/a", NodeKind::File));
        let mut b = Node::new("b", "/r", NodeKind::Directory);
        b.push_child(Node::new("mod.rs", "/r/b", NodeKind::File));
        root.push_child(a);
        root.push_child(Node::new("lib.rs", "/r", NodeKind::File));
        root.push_child(b);
        let mut app = App::new(root, Annotate::default(), theme::dark_theme());
        app.handle(Input::Resize {
            width: 40,
            height: 10,
        });

        type_query(&mut app, "mod");
        app.handle(Input::Enter);

        let rows = app.visible_rows();
        let dirs: Vec<_> = rows.iter().map(|r| r.node.dir_path.clone()).collect();
        assert_eq!(dirs, vec![PathBuf::from("/r/a"), PathBuf::from("/r/b")]);
        drop(rows);

        app.handle(Input::Down);
        assert_eq!(app.selected.dir_path, PathBuf::from("/r/b"));
        app.handle(Input::Down);
        assert_eq!(app.selected.dir_path, PathBuf::from("/r/b"));
    }
}
