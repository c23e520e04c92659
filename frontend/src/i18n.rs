//! User-facing strings.
//!
//! The board ships in Simplified Chinese with an English table for
//! documents whose `lang` attribute starts with `en`.

use web_sys::window;

#[derive(Debug, PartialEq, Eq)]
pub struct Messages {
    pub title: &'static str,
    pub input_placeholder: &'static str,
    pub submit_label: &'static str,
    pub submit_hint: &'static str,
    pub loading: &'static str,
    pub empty_state: &'static str,
    pub delete_label: &'static str,
    pub dismiss_label: &'static str,
    pub confirm_delete: &'static str,
    pub empty_input: &'static str,
    pub add_failed: &'static str,
    pub delete_failed: &'static str,
    pub network_error: &'static str,
}

static ZH_CN: Messages = Messages {
    title: "智能提醒事项",
    input_placeholder: "例如：明天下午三点在西湖边跑步",
    submit_label: "添加任务",
    submit_hint: "Ctrl + Enter 快速提交",
    loading: "正在处理，请稍候...",
    empty_state: "暂无提醒事项",
    delete_label: "删除",
    dismiss_label: "关闭",
    confirm_delete: "确定要删除该任务吗？",
    empty_input: "请输入提醒事项内容",
    add_failed: "添加任务失败",
    delete_failed: "删除任务失败",
    network_error: "网络错误，请检查连接",
};

static EN: Messages = Messages {
    title: "Reminders",
    input_placeholder: "e.g. run by the lake tomorrow at 3pm",
    submit_label: "Add task",
    submit_hint: "Ctrl + Enter to submit",
    loading: "Working on it...",
    empty_state: "No reminders yet",
    delete_label: "Delete",
    dismiss_label: "Dismiss",
    confirm_delete: "Delete this task?",
    empty_input: "Please enter reminder content",
    add_failed: "Failed to add task",
    delete_failed: "Failed to delete task",
    network_error: "Network error, please check your connection",
};

impl Messages {
    pub fn zh_cn() -> &'static Messages {
        &ZH_CN
    }

    pub fn en() -> &'static Messages {
        &EN
    }

    /// Picks a table for a BCP 47 language tag.
    pub fn for_lang(tag: &str) -> &'static Messages {
        if tag.trim().to_ascii_lowercase().starts_with("en") {
            Self::en()
        } else {
            Self::zh_cn()
        }
    }

    /// Table matching `<html lang>` of the current document.
    pub fn for_document() -> &'static Messages {
        let lang = window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
            .and_then(|root| root.get_attribute("lang"))
            .unwrap_or_default();
        Self::for_lang(&lang)
    }
}
