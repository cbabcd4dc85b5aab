use super::*;

fn complete_fields() -> PromptFields {
    PromptFields::new()
        .context("The sky is blue.")
        .chat_history("Human: hi\nAssistant: hello")
        .question("What color is the sky?")
}

#[test]
fn render_includes_all_sections_in_order() {
    let prompt = complete_fields().render().expect("render should succeed");

    let ctx_open = prompt.find("<ctx>").expect("context delimiter");
    let ctx_close = prompt.find("</ctx>").expect("context close delimiter");
    let hs_open = prompt.find("<hs>").expect("history delimiter");
    let hs_close = prompt.find("</hs>").expect("history close delimiter");
    let question = prompt.find("What color is the sky?").expect("question");

    assert!(ctx_open < ctx_close);
    assert!(ctx_close < hs_open);
    assert!(hs_open < hs_close);
    assert!(hs_close < question);
    assert!(prompt.contains("The sky is blue."));
    assert!(prompt.ends_with("Answer:"));
}

#[test]
fn missing_question_fails_explicitly() {
    let fields = PromptFields::new()
        .context("some context")
        .chat_history("some history");

    let result = fields.render();
    assert!(matches!(
        result,
        Err(crate::PdfChatError::MissingPromptField("question"))
    ));
}

#[test]
fn missing_context_fails_explicitly() {
    let fields = PromptFields::new()
        .chat_history("some history")
        .question("a question");

    assert!(matches!(
        fields.render(),
        Err(crate::PdfChatError::MissingPromptField("context"))
    ));
}

#[test]
fn missing_chat_history_fails_explicitly() {
    let fields = PromptFields::new()
        .context("some context")
        .question("a question");

    assert!(matches!(
        fields.render(),
        Err(crate::PdfChatError::MissingPromptField("chat_history"))
    ));
}

#[test]
fn empty_field_values_are_allowed() {
    // A fresh session has no history and an empty store retrieves nothing;
    // present-but-empty is not the same as missing
    let prompt = PromptFields::new()
        .context("")
        .chat_history("")
        .question("What color is the sky?")
        .render()
        .expect("render should succeed");

    assert!(prompt.contains("<ctx>\n\n</ctx>"));
    assert!(prompt.contains("<hs>\n\n</hs>"));
}
