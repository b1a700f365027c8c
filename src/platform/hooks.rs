//! Message context-menu and popover contributions.
//!
//! Each hook inspects a message and either contributes nothing or returns a
//! descriptor whose [`HookAction`] runs when the user clicks it.

use crate::config::SilentDeleteConfig;
use crate::discord::MessageApi;
use crate::silent::{clear_logger_history, silent_delete};

use super::MessageRef;

pub const SILENT_DELETE_LABEL: &str = "Silent Delete";
pub const SILENT_DELETE_HISTORY_ID: &str = "silent-delete-history";
pub const SILENT_DELETE_HISTORY_LABEL: &str = "Silent Delete History";

/// What a click on a contributed entry does.
#[derive(Debug, Clone, PartialEq)]
pub enum HookAction {
    SilentDelete {
        channel_id: String,
        message_id: String,
    },
    ClearHistory {
        channel_id: String,
        message_id: String,
    },
}

impl HookAction {
    /// Run the action; failures are logged and reported as `false`.
    pub async fn run(&self, api: &dyn MessageApi, config: &SilentDeleteConfig) -> bool {
        match self {
            HookAction::SilentDelete {
                channel_id,
                message_id,
            } => silent_delete(api, config, channel_id, message_id).await,
            HookAction::ClearHistory {
                channel_id,
                message_id,
            } => clear_logger_history(api, config, channel_id, message_id).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    /// Label text colour.
    pub color: String,
    pub icon_svg: String,
    pub action: HookAction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopoverButton {
    pub label: String,
    pub icon_svg: String,
    pub dangerous: bool,
    pub action: HookAction,
}

/// Context-menu entry for the user's own messages that are already deleted.
pub fn message_context_menu(
    message: &MessageRef,
    current_user_id: &str,
    config: &SilentDeleteConfig,
) -> Option<MenuItem> {
    if !message.is_owned_by(current_user_id) || !message.deleted {
        return None;
    }

    Some(MenuItem {
        id: SILENT_DELETE_HISTORY_ID.to_string(),
        label: SILENT_DELETE_HISTORY_LABEL.to_string(),
        color: config.accent_color().to_string(),
        icon_svg: trash_icon_svg(config.accent_color()),
        action: HookAction::ClearHistory {
            channel_id: message.channel_id.clone(),
            message_id: message.message_id.clone(),
        },
    })
}

/// Popover button for the user's own messages that still exist.
pub fn message_popover(
    message: &MessageRef,
    current_user_id: &str,
    config: &SilentDeleteConfig,
) -> Option<PopoverButton> {
    if !message.is_owned_by(current_user_id) || message.deleted {
        return None;
    }

    Some(PopoverButton {
        label: SILENT_DELETE_LABEL.to_string(),
        icon_svg: trash_icon_svg(config.accent_color()),
        dangerous: true,
        action: HookAction::SilentDelete {
            channel_id: message.channel_id.clone(),
            message_id: message.message_id.clone(),
        },
    })
}

/// 18x18 trash can icon filled with `color`.
pub fn trash_icon_svg(color: &str) -> String {
    format!(
        concat!(
            r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="{}">"#,
            r#"<path d="M15 3.999V2H9V3.999H3V5.999H21V3.999H15Z"/>"#,
            r#"<path d="M5 6.99902V18.999C5 20.101 5.897 20.999 7 20.999H17C18.103 20.999 19 20.101 19 18.999V6.99902H5ZM11 17H9V11H11V17ZM15 17H13V11H15V17Z"/>"#,
            "</svg>"
        ),
        color
    )
}
