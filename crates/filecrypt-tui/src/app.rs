use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use secrecy::SecretString;
use tracing::{info, warn};
use zeroize::Zeroize;

use filecrypt_core::{FileTree, NodeId};
use filecrypt_crypto::{
    decrypt_file, decrypted_output_path, encrypt_file, encrypted_output_path,
};

use crate::filetype;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Encrypt,
    Decrypt,
    Exit,
}

impl MenuItem {
    pub const ALL: &[MenuItem] = &[MenuItem::Encrypt, MenuItem::Decrypt, MenuItem::Exit];

    pub fn title(&self) -> &str {
        match self {
            MenuItem::Encrypt => "Encrypt File",
            MenuItem::Decrypt => "Decrypt File",
            MenuItem::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptOp {
    Encrypt,
    Decrypt,
}

impl CryptOp {
    pub fn verb(&self) -> &str {
        match self {
            CryptOp::Encrypt => "Encrypt",
            CryptOp::Decrypt => "Decrypt",
        }
    }

    fn done(&self) -> &str {
        match self {
            CryptOp::Encrypt => "encrypted",
            CryptOp::Decrypt => "decrypted",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Screen {
    Menu,
    Browser { op: CryptOp },
    Confirm { op: CryptOp, node: NodeId, label: String },
    Password { op: CryptOp, node: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

pub struct App {
    pub root_path: PathBuf,
    pub show_hidden: bool,
    pub tree: FileTree,
    pub flat: Vec<NodeId>,
    pub screen: Screen,
    pub menu_cursor: usize,
    pub browser_cursor: usize,
    pub password_input: String,
    pub message: Option<(MessageLevel, String)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(root_path: PathBuf, show_hidden: bool) -> Result<Self, filecrypt_core::FilecryptError> {
        let tree = FileTree::scan(&root_path, show_hidden)?;
        let flat = tree.flatten();
        Ok(Self {
            root_path,
            show_hidden,
            tree,
            flat,
            screen: Screen::Menu,
            menu_cursor: 0,
            browser_cursor: 0,
            password_input: String::new(),
            message: None,
            should_quit: false,
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match &self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Browser { op } => {
                let op = *op;
                self.handle_browser_key(key, op);
            }
            Screen::Confirm { op, node, .. } => {
                let (op, node) = (*op, *node);
                self.handle_confirm_key(key, op, node);
            }
            Screen::Password { op, node } => {
                let (op, node) = (*op, *node);
                self.handle_password_key(key, op, node);
            }
        }
    }

    pub fn set_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.message = Some((level, text.into()));
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up => {
                self.menu_cursor = self.menu_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                self.menu_cursor = usize::min(self.menu_cursor + 1, MenuItem::ALL.len() - 1);
            }
            KeyCode::Char('1') => self.open_browser(CryptOp::Encrypt),
            KeyCode::Char('2') => self.open_browser(CryptOp::Decrypt),
            KeyCode::Char('3') => self.should_quit = true,
            KeyCode::Enter => match MenuItem::ALL[self.menu_cursor] {
                MenuItem::Encrypt => self.open_browser(CryptOp::Encrypt),
                MenuItem::Decrypt => self.open_browser(CryptOp::Decrypt),
                MenuItem::Exit => self.should_quit = true,
            },
            _ => {}
        }
    }

    fn open_browser(&mut self, op: CryptOp) {
        self.message = None;
        self.browser_cursor = 0;
        self.screen = Screen::Browser { op };
    }

    fn handle_browser_key(&mut self, key: KeyEvent, op: CryptOp) {
        match key.code {
            KeyCode::Esc => self.screen = Screen::Menu,
            KeyCode::Up => {
                self.browser_cursor = self.browser_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if !self.flat.is_empty() {
                    self.browser_cursor =
                        usize::min(self.browser_cursor + 1, self.flat.len() - 1);
                }
            }
            KeyCode::Enter => {
                let Some(&node) = self.flat.get(self.browser_cursor) else {
                    return;
                };
                if self.tree.node(node).is_dir {
                    self.set_message(MessageLevel::Warning, "Please select a valid file");
                    return;
                }
                let label = filetype::label(&self.tree.node(node).path).to_string();
                self.screen = Screen::Confirm { op, node, label };
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, op: CryptOp, node: NodeId) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.password_input.clear();
                self.screen = Screen::Password { op, node };
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.screen = Screen::Menu;
            }
            _ => {}
        }
    }

    fn handle_password_key(&mut self, key: KeyEvent, op: CryptOp, node: NodeId) {
        match key.code {
            KeyCode::Esc => {
                self.password_input.zeroize();
                self.screen = Screen::Menu;
            }
            KeyCode::Backspace => {
                self.password_input.pop();
            }
            KeyCode::Char(c) => self.password_input.push(c),
            KeyCode::Enter => {
                if self.password_input.is_empty() {
                    // Policy check: the crypto core itself accepts any password.
                    self.set_message(MessageLevel::Warning, "Password cannot be empty");
                    return;
                }
                self.run_operation(op, node);
            }
            _ => {}
        }
    }

    fn run_operation(&mut self, op: CryptOp, node: NodeId) {
        // Moving the buffer into a SecretString wipes it when the operation
        // is done.
        let password = SecretString::from(std::mem::take(&mut self.password_input));
        let src = self.tree.node(node).path.clone();

        let (dest, result) = match op {
            CryptOp::Encrypt => {
                let dest = encrypted_output_path(&src);
                let result = encrypt_file(&src, &dest, &password);
                (dest, result)
            }
            CryptOp::Decrypt => {
                let dest = decrypted_output_path(&src);
                let result = decrypt_file(&src, &dest, &password);
                (dest, result)
            }
        };

        match result {
            Ok(()) => {
                info!(src = %src.display(), dest = %dest.display(), "operation complete");
                self.set_message(
                    MessageLevel::Success,
                    format!("File {} and saved to {}", op.done(), dest.display()),
                );
            }
            Err(e) => {
                warn!(src = %src.display(), "operation failed: {e}");
                self.set_message(MessageLevel::Error, format!("{} failed: {e}", op.verb()));
            }
        }

        self.screen = Screen::Menu;
        self.rescan();
    }

    /// Rebuild the tree so new outputs show up. On failure the previous
    /// tree stays in place.
    fn rescan(&mut self) {
        match FileTree::scan(&self.root_path, self.show_hidden) {
            Ok(tree) => {
                self.flat = tree.flatten();
                self.tree = tree;
                if self.browser_cursor >= self.flat.len() {
                    self.browser_cursor = self.flat.len().saturating_sub(1);
                }
            }
            Err(e) => {
                warn!(path = %self.root_path.display(), "rescan failed: {e}");
                self.set_message(MessageLevel::Error, format!("Failed to rescan: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::fs;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn fixture_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("doc.txt"), b"hello").unwrap();
        let app = App::new(dir.path().to_path_buf(), false).unwrap();
        (dir, app)
    }

    #[test]
    fn test_menu_enter_opens_browser() {
        let (_dir, mut app) = fixture_app();
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.screen, Screen::Browser { op: CryptOp::Encrypt }));
    }

    #[test]
    fn test_escape_quits_from_menu() {
        let (_dir, mut app) = fixture_app();
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_directory_selection_is_rejected() {
        let (_dir, mut app) = fixture_app();
        app.handle_key(key(KeyCode::Char('1')));
        // Cursor starts on the root directory node.
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.screen, Screen::Browser { .. }));
        assert!(matches!(app.message, Some((MessageLevel::Warning, _))));
    }

    #[test]
    fn test_file_selection_asks_for_confirmation() {
        let (_dir, mut app) = fixture_app();
        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.screen, Screen::Confirm { .. }));
    }

    #[test]
    fn test_empty_password_is_rejected() {
        let (_dir, mut app) = fixture_app();
        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('y')));
        assert!(matches!(app.screen, Screen::Password { .. }));
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.screen, Screen::Password { .. }));
        assert!(matches!(app.message, Some((MessageLevel::Warning, _))));
    }

    #[test]
    fn test_confirm_no_returns_to_menu() {
        let (_dir, mut app) = fixture_app();
        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('n')));
        assert!(matches!(app.screen, Screen::Menu));
    }
}
