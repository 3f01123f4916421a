//! Application shell: composition, navigation and chrome.
//!
//! The shell owns the top-level window model — title, menu structure,
//! status surface and the tab container hosting one instance of each
//! business module. It does not own module internals and it does not render
//! anything itself; a [`ShellFrontend`] implementation does that.

pub mod error;
pub mod frontend;

use serde::Deserialize;

use crate::kernel::constants;
use crate::module_system::BusinessModule;
use crate::storage::config::ShellConfig;

pub use frontend::{ShellAction, ShellFrontend};

/// Layout direction applied uniformly to the whole shell. A presentation
/// setting, never a per-module concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// An action offered by the menu structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    NewDocument,
    SaveDocument,
    Exit,
    About,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: &'static str,
    pub accelerator: Option<&'static str>,
    pub action: MenuAction,
}

#[derive(Debug, Clone)]
pub struct MenuGroup {
    pub label: &'static str,
    pub items: Vec<MenuItem>,
}

/// One tab: a module instance plus its display label.
pub struct Tab {
    pub label: String,
    pub module: Box<dyn BusinessModule>,
}

/// The composed top-level window model.
pub struct Shell {
    title: String,
    layout_direction: LayoutDirection,
    style: String,
    menu: Vec<MenuGroup>,
    tabs: Vec<Tab>,
}

impl Shell {
    /// Compose the shell from the instantiated module sequence. Tab order is
    /// the order of `modules`, which the registry guarantees to be registry
    /// order.
    pub fn compose(config: &ShellConfig, modules: Vec<(String, Box<dyn BusinessModule>)>) -> Self {
        let tabs = modules
            .into_iter()
            .map(|(label, module)| Tab { label, module })
            .collect();
        Self {
            title: config.window_title.clone(),
            layout_direction: config.layout_direction,
            style: config.style.clone(),
            menu: default_menu(),
            tabs,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn layout_direction(&self) -> LayoutDirection {
        self.layout_direction
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn menu(&self) -> &[MenuGroup] {
        &self.menu
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tab_labels(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.label.as_str()).collect()
    }

    /// Static informational content behind the about action.
    pub fn about_text(&self) -> String {
        format!(
            "{} v{}\n{}",
            constants::APP_NAME,
            constants::APP_VERSION,
            constants::APP_DESCRIPTION
        )
    }
}

/// The fixed menu structure: document, edit, view, tool and help actions.
fn default_menu() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            label: "Document",
            items: vec![
                MenuItem {
                    label: "New",
                    accelerator: Some("Ctrl+N"),
                    action: MenuAction::NewDocument,
                },
                MenuItem {
                    label: "Save",
                    accelerator: Some("Ctrl+S"),
                    action: MenuAction::SaveDocument,
                },
                MenuItem {
                    label: "Exit",
                    accelerator: Some("Ctrl+Q"),
                    action: MenuAction::Exit,
                },
            ],
        },
        MenuGroup {
            label: "Edit",
            items: vec![],
        },
        MenuGroup {
            label: "View",
            items: vec![],
        },
        MenuGroup {
            label: "Tools",
            items: vec![],
        },
        MenuGroup {
            label: "Help",
            items: vec![MenuItem {
                label: "About",
                accelerator: Some("F1"),
                action: MenuAction::About,
            }],
        },
    ]
}

/// Mutable presentation state owned by the shell for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    active_tab: usize,
    status_message: String,
    about_visible: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            active_tab: 0,
            status_message: "Ready".to_string(),
            about_visible: false,
        }
    }

    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    pub fn about_visible(&self) -> bool {
        self.about_visible
    }

    /// Apply one operator action. Returns `true` when the shell should
    /// close.
    pub fn apply(&mut self, action: ShellAction, tab_count: usize) -> bool {
        match action {
            ShellAction::None => {}
            ShellAction::NextTab => {
                if tab_count > 0 {
                    self.active_tab = (self.active_tab + 1) % tab_count;
                }
            }
            ShellAction::PrevTab => {
                if tab_count > 0 {
                    self.active_tab = (self.active_tab + tab_count - 1) % tab_count;
                }
            }
            ShellAction::SelectTab(index) => {
                if index < tab_count {
                    self.active_tab = index;
                }
            }
            ShellAction::ShowAbout => {
                self.about_visible = true;
            }
            ShellAction::DismissDialog => {
                self.about_visible = false;
            }
            ShellAction::Close => return true,
        }
        false
    }
}

#[cfg(test)]
mod tests;
