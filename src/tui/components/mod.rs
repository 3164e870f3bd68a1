//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Dashboard header with email, status and key hints
//! - `Message`: One chat turn
//! - `LoadingScreen`: Shown during the startup auth check
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `AuthFormState`: Login and signup fields
//! - `SidebarState`: Previous chats list cursor
//! - `InputBox`: Chat input
//! - `MessageListState`: Scroll position and layout cache
//!
//! Stateful components split into a persistent `*State` kept in `TuiState`
//! and a transient wrapper built each frame with props from `App`. Events
//! they emit are turned into core `Action`s by the TUI loop; components never
//! touch `App` directly.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── auth_form.rs     (Login / signup screen)
//! ├── input_box.rs     (Chat input)
//! ├── loading.rs       (Startup screen)
//! ├── message.rs       (Single message renderer)
//! ├── message_list.rs  (Scrollable message container)
//! ├── sidebar.rs       (Previous chats)
//! ├── text_field.rs    (Single-line editor shared by the forms and input)
//! └── title_bar.rs     (Dashboard header)
//! ```

pub mod auth_form;
pub mod input_box;
pub mod loading;
pub mod message;
pub mod message_list;
pub mod sidebar;
pub mod text_field;
mod title_bar;

pub use auth_form::{AuthForm, AuthFormState, AuthMode};
pub use input_box::{InputBox, InputEvent};
pub use loading::LoadingScreen;
pub use message_list::{MessageList, MessageListState};
pub use sidebar::{Sidebar, SidebarEvent, SidebarState};
pub use title_bar::TitleBar;
