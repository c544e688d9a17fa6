/// Anything that is not a command is echoed back unchanged
pub fn handle_general_message(text: &str) -> String {
    text.to_string()
}
