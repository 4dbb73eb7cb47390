// src/ui.rs

use crate::{
    constants,
    i18n::{MessageKey, Messages},
    progress::{CancelSignal, ProgressDialog},
    symbols,
};
use colored::*;
use std::io::{self, Write};

/// 与用户交互的"对话框"。控制台实现把阻塞式对话框画成文本框，
/// 测试里可以换成预先写好答案的实现。
pub trait Dialogs {
    fn confirm(&self, title: &str, message: &str) -> bool;
    fn info(&self, title: &str, message: &str);
    fn error(&self, title: &str, message: &str);
    fn open_progress(&self, title: &str, message: &str) -> ProgressDialog;
}

pub struct ConsoleDialogs {
    messages: &'static Messages,
    cancel: CancelSignal,
}

impl ConsoleDialogs {
    pub fn new(messages: &'static Messages, cancel: CancelSignal) -> Self {
        Self { messages, cancel }
    }
}

impl Dialogs for ConsoleDialogs {
    fn confirm(&self, title: &str, message: &str) -> bool {
        // 最后一行是问题本身，放到输入提示里
        let (body, question) = message.rsplit_once('\n').unwrap_or(("", message));
        box_message(title, body.trim_end(), Color::Cyan);
        confirm(question, true)
    }

    fn info(&self, title: &str, message: &str) {
        box_message(title, message, Color::Cyan);
    }

    fn error(&self, title: &str, message: &str) {
        box_message(title, message, Color::Red);
    }

    fn open_progress(&self, title: &str, message: &str) -> ProgressDialog {
        ProgressDialog::new(
            title,
            message,
            self.messages.get(MessageKey::CancelButton),
            self.cancel.clone(),
        )
    }
}

/// 终端里的"模态框"：着色的标题栏，正文为空时不画分隔线
pub fn box_message(title: &str, body: &str, accent: Color) {
    let rule = "─".repeat(constants::UI_WIDTH - 2);
    println!("\n┌{}┐", rule);
    println!("  {}", title.bold().color(accent));
    if !body.is_empty() {
        println!("├{}┤", rule);
        for line in body.lines() {
            println!("  {}", line);
        }
    }
    println!("└{}┘", rule);
}

pub fn prompt(message: &str) -> io::Result<String> {
    print!("\n>>> {}: ", message);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(io::ErrorKind::UnexpectedEof.into());
    }
    Ok(input.trim().to_string())
}

/// 是/否确认。输入流关闭或读取失败时视为"否"。
pub fn confirm(question: &str, default_yes: bool) -> bool {
    let options = if default_yes { "(Y/n)" } else { "(y/N)" };
    loop {
        match prompt(&format!("{} {} ({})", question, options, *symbols::CTRL_C)) {
            Ok(choice) => match parse_yes_no(&choice) {
                Some(answer) => return answer,
                None if choice.is_empty() => return default_yes,
                None => println!("{} {}", *symbols::WARN, "y / n".red()),
            },
            Err(_) => return false,
        }
    }
}

fn parse_yes_no(choice: &str) -> Option<bool> {
    match choice.trim().to_lowercase().as_str() {
        "y" | "yes" | "예" | "네" => Some(true),
        "n" | "no" | "아니요" | "아니오" => Some(false),
        _ => None,
    }
}
