//! Pure state transitions: (model, key) → outcome.
//!
//! Fully testable without a terminal. Each prompt decides which keys it
//! accepts; anything unhandled is a no-op that still returns `Continue`.
//! Ctrl-C aborts every prompt.

use std::path::PathBuf;

use crate::keys::{Key, KeyKind};
use crate::listing::{Entry, is_root};

use super::state::{Browser, Confirm, Effect, FilterView, Input, Outcome, Select, TextEditor};

// ============================================================================
// SHARED FILTER LOGIC
// ============================================================================

impl FilterView {
    /// Recompute `indices` from `query` and clamp the selection into range.
    pub fn refilter<'a>(&mut self, names: impl Iterator<Item = &'a str>) {
        let needle = self.query.to_lowercase();
        self.indices = names
            .enumerate()
            .filter(|(_, name)| needle.is_empty() || name.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.selected = self.selected.min(self.indices.len().saturating_sub(1));
        self.follow_selection();
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.follow_selection();
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.indices.len() {
            self.selected += 1;
        }
        self.follow_selection();
    }

    /// Back to an empty query with the first row selected.
    pub fn reset(&mut self) {
        self.query.clear();
        self.selected = 0;
        self.window.offset = 0;
    }

    /// Scroll the window so the selected row is on screen.
    fn follow_selection(&mut self) {
        let window = &mut self.window;
        if self.selected < window.offset {
            window.offset = self.selected;
        }
        if self.selected >= window.offset + window.rows {
            window.offset = self.selected + 1 - window.rows;
        }
        window.offset = window.offset.min(self.indices.len().saturating_sub(window.rows));
    }

    /// Apply the navigation and filter-editing keys shared by every list.
    fn edit<'a>(&mut self, key: &Key, names: impl Iterator<Item = &'a str>) {
        match key.kind {
            KeyKind::Up => self.move_up(),
            KeyKind::Down => self.move_down(),
            KeyKind::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter(names);
                }
            }
            KeyKind::Escape => {
                self.query.clear();
                self.selected = 0;
                self.refilter(names);
            }
            _ => {
                if let Some(c) = key.printable() {
                    self.query.push(c);
                    self.refilter(names);
                }
            }
        }
    }
}

// ============================================================================
// PER-PROMPT TRANSITIONS
// ============================================================================

impl Confirm {
    /// y/Y and n/N answer directly; Enter takes the default.
    pub fn update(&mut self, key: &Key) -> Outcome<bool> {
        match (key.kind, key.rune) {
            (KeyKind::CtrlC, _) => Outcome::Abort,
            (KeyKind::Enter, _) => Outcome::Submit(self.default),
            (_, Some('y' | 'Y')) => Outcome::Submit(true),
            (_, Some('n' | 'N')) => Outcome::Submit(false),
            _ => Outcome::Continue,
        }
    }
}

impl Input {
    pub fn update(&mut self, key: &Key) -> Outcome<String> {
        match key.kind {
            KeyKind::CtrlC => Outcome::Abort,
            KeyKind::Enter => {
                if self.buffer.is_empty() && !self.placeholder.is_empty() {
                    Outcome::Submit(self.placeholder.clone())
                } else {
                    Outcome::Submit(self.buffer.clone())
                }
            }
            KeyKind::Backspace => {
                self.buffer.pop();
                Outcome::Continue
            }
            KeyKind::CtrlU => {
                self.buffer.clear();
                Outcome::Continue
            }
            _ => {
                if let Some(c) = key.printable() {
                    self.buffer.push(c);
                }
                Outcome::Continue
            }
        }
    }
}

impl TextEditor {
    /// Enter opens a line below; only Ctrl-D submits.
    pub fn update(&mut self, key: &Key) -> Outcome<String> {
        match key.kind {
            KeyKind::CtrlC => Outcome::Abort,
            KeyKind::CtrlD => Outcome::Submit(self.lines.join("\n")),
            KeyKind::Enter => {
                self.current += 1;
                self.lines.insert(self.current, String::new());
                Outcome::Continue
            }
            KeyKind::Backspace => {
                if self.lines[self.current].pop().is_none() && self.current > 0 {
                    // Empty line: drop it and land on the one above
                    self.lines.remove(self.current);
                    self.current -= 1;
                }
                Outcome::Continue
            }
            KeyKind::Up => {
                self.current = self.current.saturating_sub(1);
                Outcome::Continue
            }
            KeyKind::Down => {
                if self.current + 1 < self.lines.len() {
                    self.current += 1;
                }
                Outcome::Continue
            }
            _ => {
                if let Some(c) = key.printable() {
                    self.lines[self.current].push(c);
                }
                Outcome::Continue
            }
        }
    }
}

impl Select {
    /// Submits `(original index, item)`.
    pub fn update(&mut self, key: &Key) -> Outcome<(usize, String)> {
        match key.kind {
            KeyKind::CtrlC => Outcome::Abort,
            KeyKind::Enter => match self.view.current() {
                Some(i) => Outcome::Submit((i, self.items[i].clone())),
                None => Outcome::Continue,
            },
            _ => {
                self.view.edit(key, self.items.iter().map(String::as_str));
                Outcome::Continue
            }
        }
    }
}

impl Browser {
    pub fn update(&mut self, key: &Key) -> Outcome<PathBuf> {
        match key.kind {
            KeyKind::CtrlC => Outcome::Abort,
            KeyKind::Enter => match self.selected_entry() {
                Some(entry) if entry.is_dir => {
                    Outcome::Effect(Effect::ChangeDir(entry.path.clone()))
                }
                Some(entry) => Outcome::Submit(entry.path.clone()),
                None => Outcome::Continue,
            },
            KeyKind::Right => match self.selected_entry() {
                Some(entry) if entry.is_dir => {
                    Outcome::Effect(Effect::ChangeDir(entry.path.clone()))
                }
                _ => Outcome::Continue,
            },
            KeyKind::Left => match self.dir.parent() {
                Some(parent) if !is_root(&self.dir) => {
                    Outcome::Effect(Effect::ChangeDir(parent.to_path_buf()))
                }
                _ => Outcome::Continue,
            },
            KeyKind::Home => match &self.home {
                Some(home) => Outcome::Effect(Effect::ChangeDir(home.clone())),
                None => Outcome::Continue,
            },
            _ => {
                self.view.edit(key, self.entries.iter().map(|e| e.name.as_str()));
                Outcome::Continue
            }
        }
    }

    /// Make `dir` current with a fresh listing; filter and selection reset.
    pub fn enter(&mut self, dir: PathBuf, entries: Vec<Entry>) {
        self.dir = dir;
        self.entries = entries;
        self.view.reset();
        self.view.refilter(self.entries.iter().map(|e| e.name.as_str()));
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::decode;

    fn key(kind: KeyKind) -> Key {
        Key::named(kind)
    }

    fn typed(s: &str) -> Vec<Key> {
        s.chars().map(Key::char).collect()
    }

    fn colors() -> Select {
        Select::new("Color", &["Red", "Green", "Blue"]).unwrap()
    }

    fn visible_items(select: &Select) -> Vec<&str> {
        select
            .view
            .indices
            .iter()
            .map(|&i| select.items[i].as_str())
            .collect()
    }

    fn entry(name: &str, dir: bool) -> Entry {
        Entry {
            name: name.to_string(),
            path: PathBuf::from("/work").join(name),
            is_dir: dir,
        }
    }

    fn browser() -> Browser {
        let mut entries = vec![Entry {
            name: "..".to_string(),
            path: PathBuf::from("/"),
            is_dir: true,
        }];
        entries.push(entry("src", true));
        entries.push(entry("a.json", false));
        entries.push(entry("b.json", false));
        Browser::with_listing("Pick", vec![".json".into()], PathBuf::from("/work"), entries)
            .with_home(Some(PathBuf::from("/home/op")))
    }

    // -- Confirm --

    #[test]
    fn confirm_enter_takes_default() {
        assert_eq!(Confirm::new("Go?", true).update(&key(KeyKind::Enter)), Outcome::Submit(true));
        assert_eq!(Confirm::new("Go?", false).update(&key(KeyKind::Enter)), Outcome::Submit(false));
    }

    #[test]
    fn confirm_letters_answer_directly() {
        let mut c = Confirm::new("Go?", false);
        assert_eq!(c.update(&Key::char('y')), Outcome::Submit(true));
        assert_eq!(c.update(&Key::char('Y')), Outcome::Submit(true));
        assert_eq!(c.update(&Key::char('n')), Outcome::Submit(false));
        assert_eq!(c.update(&Key::char('N')), Outcome::Submit(false));
    }

    #[test]
    fn confirm_ignores_other_keys() {
        let mut c = Confirm::new("Go?", true);
        assert_eq!(c.update(&Key::char('x')), Outcome::Continue);
        assert_eq!(c.update(&key(KeyKind::Up)), Outcome::Continue);
    }

    #[test]
    fn confirm_ctrl_c_aborts() {
        assert_eq!(Confirm::new("Go?", true).update(&key(KeyKind::CtrlC)), Outcome::Abort);
    }

    // -- Input --

    #[test]
    fn input_appends_and_submits() {
        let mut input = Input::new("Name", "");
        for k in typed("héllo") {
            assert_eq!(input.update(&k), Outcome::Continue);
        }
        assert_eq!(input.update(&key(KeyKind::Enter)), Outcome::Submit("héllo".into()));
    }

    #[test]
    fn input_empty_enter_uses_placeholder() {
        let mut input = Input::new("Name", "anonymous");
        assert_eq!(input.update(&key(KeyKind::Enter)), Outcome::Submit("anonymous".into()));
    }

    #[test]
    fn input_empty_enter_without_placeholder_is_empty() {
        let mut input = Input::new("Name", "");
        assert_eq!(input.update(&key(KeyKind::Enter)), Outcome::Submit(String::new()));
    }

    #[test]
    fn input_backspace_removes_a_whole_rune() {
        let mut input = Input::new("Name", "");
        for k in typed("a日") {
            input.update(&k);
        }
        input.update(&key(KeyKind::Backspace));
        assert_eq!(input.buffer, "a");
        input.update(&key(KeyKind::Backspace));
        input.update(&key(KeyKind::Backspace));
        assert_eq!(input.buffer, "");
    }

    #[test]
    fn input_ctrl_u_clears() {
        let mut input = Input::new("Name", "");
        for k in typed("abc") {
            input.update(&k);
        }
        input.update(&key(KeyKind::CtrlU));
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn input_ignores_control_runes_but_accepts_space() {
        let mut input = Input::new("Name", "");
        input.update(&decode(b"\t"));
        input.update(&decode(b" "));
        input.update(&decode(b"\x1b[A"));
        assert_eq!(input.buffer, " ");
    }

    // -- Text editor --

    #[test]
    fn editor_enter_inserts_line_after_current() {
        let mut ed = TextEditor::new("Notes", "");
        for k in typed("one") {
            ed.update(&k);
        }
        ed.update(&key(KeyKind::Enter));
        for k in typed("three") {
            ed.update(&k);
        }
        ed.update(&key(KeyKind::Up));
        assert_eq!(ed.update(&key(KeyKind::Enter)), Outcome::Continue);
        for k in typed("two") {
            ed.update(&k);
        }
        assert_eq!(ed.lines, vec!["one", "two", "three"]);
        assert_eq!(ed.current, 1);
    }

    #[test]
    fn editor_ctrl_d_joins_lines() {
        let mut ed = TextEditor::new("Notes", "");
        for k in typed("a") {
            ed.update(&k);
        }
        ed.update(&key(KeyKind::Enter));
        for k in typed("b") {
            ed.update(&k);
        }
        assert_eq!(ed.update(&key(KeyKind::CtrlD)), Outcome::Submit("a\nb".into()));
    }

    #[test]
    fn editor_backspace_on_empty_line_removes_it() {
        let mut ed = TextEditor::new("Notes", "");
        for k in typed("ab") {
            ed.update(&k);
        }
        ed.update(&key(KeyKind::Enter));
        assert_eq!(ed.lines.len(), 2);
        ed.update(&key(KeyKind::Backspace));
        assert_eq!(ed.lines, vec!["ab"]);
        assert_eq!(ed.current, 0);
        ed.update(&key(KeyKind::Backspace));
        assert_eq!(ed.lines, vec!["a"]);
    }

    #[test]
    fn editor_backspace_on_first_empty_line_is_noop() {
        let mut ed = TextEditor::new("Notes", "");
        ed.update(&key(KeyKind::Backspace));
        assert_eq!(ed.lines, vec![""]);
        assert_eq!(ed.current, 0);
    }

    #[test]
    fn editor_cursor_does_not_wrap() {
        let mut ed = TextEditor::new("Notes", "");
        ed.update(&key(KeyKind::Enter));
        ed.update(&key(KeyKind::Down));
        assert_eq!(ed.current, 1);
        ed.update(&key(KeyKind::Up));
        ed.update(&key(KeyKind::Up));
        assert_eq!(ed.current, 0);
    }

    #[test]
    fn editor_ctrl_c_aborts() {
        let mut ed = TextEditor::new("Notes", "");
        assert_eq!(ed.update(&key(KeyKind::CtrlC)), Outcome::Abort);
    }

    // -- Select --

    #[test]
    fn select_filter_then_enter_returns_original_index() {
        let mut s = colors();
        for k in typed("re") {
            s.update(&k);
        }
        assert_eq!(visible_items(&s), vec!["Red", "Green"]);
        assert_eq!(s.update(&key(KeyKind::Enter)), Outcome::Submit((0, "Red".into())));
    }

    #[test]
    fn select_filter_is_case_insensitive_substring() {
        let mut s = colors();
        for k in typed("BL") {
            s.update(&k);
        }
        assert_eq!(visible_items(&s), vec!["Blue"]);
        assert_eq!(s.update(&key(KeyKind::Enter)), Outcome::Submit((2, "Blue".into())));
    }

    #[test]
    fn select_navigation_stays_in_filtered_view() {
        let mut s = colors();
        for k in typed("e") {
            s.update(&k);
        }
        for _ in 0..5 {
            s.update(&key(KeyKind::Down));
        }
        assert_eq!(s.view.selected, 2);
        assert_eq!(s.update(&key(KeyKind::Enter)), Outcome::Submit((2, "Blue".into())));
    }

    #[test]
    fn select_clearing_filter_restores_full_list() {
        let mut s = colors();
        let untouched = s.view.indices.clone();
        for k in typed("gr") {
            s.update(&k);
        }
        assert_eq!(visible_items(&s), vec!["Green"]);
        s.update(&key(KeyKind::Escape));
        assert_eq!(s.view.indices, untouched);
        assert!(s.view.query.is_empty());
        assert_eq!(s.view.selected, 0);
    }

    #[test]
    fn select_backspace_shrinks_filter() {
        let mut s = colors();
        for k in typed("blx") {
            s.update(&k);
        }
        assert!(s.view.indices.is_empty());
        assert_eq!(s.update(&key(KeyKind::Enter)), Outcome::Continue);
        s.update(&key(KeyKind::Backspace));
        assert_eq!(visible_items(&s), vec!["Blue"]);
        s.update(&key(KeyKind::Backspace));
        s.update(&key(KeyKind::Backspace));
        assert_eq!(visible_items(&s), vec!["Red", "Green", "Blue"]);
    }

    #[test]
    fn select_selection_clamps_when_view_shrinks() {
        let mut s = colors();
        s.update(&key(KeyKind::Down));
        s.update(&key(KeyKind::Down));
        assert_eq!(s.view.selected, 2);
        for k in typed("red") {
            s.update(&k);
        }
        assert_eq!(s.view.selected, 0);
    }

    #[test]
    fn select_selection_always_in_bounds() {
        let items: Vec<String> = (0..40).map(|i| format!("item {}", i)).collect();
        let mut s = Select::new("Many", &items).unwrap().max_visible(5);
        let script = [
            key(KeyKind::Down),
            Key::char('1'),
            key(KeyKind::Down),
            key(KeyKind::Down),
            Key::char('3'),
            key(KeyKind::Backspace),
            key(KeyKind::Up),
            Key::char('z'),
            key(KeyKind::Down),
            key(KeyKind::Escape),
            key(KeyKind::Down),
        ];
        for round in 0..20 {
            for k in &script {
                s.update(k);
                let len = s.view.indices.len();
                if len == 0 {
                    assert_eq!(s.view.selected, 0, "round {}", round);
                } else {
                    assert!(s.view.selected < len, "round {}", round);
                    let shown = s.view.window.visible(len);
                    assert!(shown.contains(&s.view.selected), "round {}", round);
                }
            }
        }
    }

    #[test]
    fn select_window_scrolls_with_selection() {
        let items: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let mut s = Select::new("Digits", &items).unwrap().max_visible(3);
        for _ in 0..4 {
            s.update(&key(KeyKind::Down));
        }
        assert_eq!(s.view.selected, 4);
        assert_eq!(s.view.window.offset, 2);
        for _ in 0..3 {
            s.update(&key(KeyKind::Up));
        }
        assert_eq!(s.view.window.offset, 1);
    }

    #[test]
    fn select_ctrl_c_aborts() {
        assert_eq!(colors().update(&key(KeyKind::CtrlC)), Outcome::Abort);
    }

    // -- Browser --

    #[test]
    fn browser_enter_on_file_submits_path() {
        let mut b = browser();
        b.update(&key(KeyKind::Down));
        b.update(&key(KeyKind::Down));
        assert_eq!(
            b.update(&key(KeyKind::Enter)),
            Outcome::Submit(PathBuf::from("/work/a.json"))
        );
    }

    #[test]
    fn browser_enter_on_directory_requests_navigation() {
        let mut b = browser();
        b.update(&key(KeyKind::Down));
        assert_eq!(
            b.update(&key(KeyKind::Enter)),
            Outcome::Effect(Effect::ChangeDir(PathBuf::from("/work/src")))
        );
    }

    #[test]
    fn browser_right_enters_directories_only() {
        let mut b = browser();
        b.update(&key(KeyKind::Down));
        assert_eq!(
            b.update(&key(KeyKind::Right)),
            Outcome::Effect(Effect::ChangeDir(PathBuf::from("/work/src")))
        );
        b.update(&key(KeyKind::Down));
        assert_eq!(b.update(&key(KeyKind::Right)), Outcome::Continue);
    }

    #[test]
    fn browser_left_goes_to_parent() {
        let mut b = browser();
        assert_eq!(
            b.update(&key(KeyKind::Left)),
            Outcome::Effect(Effect::ChangeDir(PathBuf::from("/")))
        );
    }

    #[cfg(unix)]
    #[test]
    fn browser_left_at_root_is_noop() {
        let mut b = Browser::with_listing("Pick", vec![], PathBuf::from("/"), vec![]);
        assert_eq!(b.update(&key(KeyKind::Left)), Outcome::Continue);
    }

    #[test]
    fn browser_home_jumps_home() {
        let mut b = browser();
        assert_eq!(
            b.update(&key(KeyKind::Home)),
            Outcome::Effect(Effect::ChangeDir(PathBuf::from("/home/op")))
        );
        let mut homeless = browser().with_home(None);
        assert_eq!(homeless.update(&key(KeyKind::Home)), Outcome::Continue);
    }

    #[test]
    fn browser_filters_by_name() {
        let mut b = browser();
        for k in typed("b.") {
            b.update(&k);
        }
        assert_eq!(b.selected_entry().map(|e| e.name.as_str()), Some("b.json"));
        b.update(&key(KeyKind::Escape));
        assert_eq!(b.view.indices.len(), 4);
    }

    #[test]
    fn browser_enter_with_no_matches_is_noop() {
        let mut b = browser();
        for k in typed("zzz") {
            b.update(&k);
        }
        assert_eq!(b.update(&key(KeyKind::Enter)), Outcome::Continue);
    }

    #[test]
    fn browser_enter_resets_filter_and_selection() {
        let mut b = browser();
        for k in typed("json") {
            b.update(&k);
        }
        b.update(&key(KeyKind::Down));
        b.enter(PathBuf::from("/work/src"), vec![entry("main.json", false)]);
        assert_eq!(b.dir, PathBuf::from("/work/src"));
        assert!(b.view.query.is_empty());
        assert_eq!(b.view.selected, 0);
        assert_eq!(b.view.indices, vec![0]);
    }

    #[test]
    fn browser_ctrl_c_aborts() {
        assert_eq!(browser().update(&key(KeyKind::CtrlC)), Outcome::Abort);
    }
}
