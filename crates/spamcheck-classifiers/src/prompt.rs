//! Labeling instructions sent with every document

/// Instructions describing the five questions and the answer format.
///
/// Sent as the system message; the document text follows as the user message.
pub const LABELING_INSTRUCTIONS: &str = r#"You are an expert content moderator. Always respond with valid JSON only.

Analyze the web content in the user message and answer five YES/NO questions.

1. Keyword spam: are terms placed on the page to attract search traffic, repeated out of context or listed with little connection to the rest of the text?
2. Malicious links: does the content contain links meant to deceive readers, such as prize bait, phishing, or requests for login or payment details?
3. Advertisements: does the content urge the reader to buy or use a product or service, visit a business, download an app, or answer a want ad? Shop details, prices with purchase instructions, shipping terms and commercial copyright notices count. A plain product specification does not.
4. Wrong language: is the content written in a language other than English? A small amount of foreign text inside English content is not wrong language.
5. Unreadable: is the content mal-encoded, empty, or otherwise incomprehensible?

Finally rate your confidence in these answers from 1 (lowest) to 5 (highest).

Rules:
- If wrong language is YES, every other answer is NO.
- If unreadable is YES, every other answer is NO.
- labels_spam is 1 when any of the first three answers is YES.

Return ONLY a JSON object in this exact format, using 1 for YES and 0 for NO:
{
  "labels_spam": 0,
  "labels_spam_vector": {
    "keyword_spam": 0,
    "malicious_links": 0,
    "ads": 0
  },
  "confidence_score": 5
}

Add "wrong_language": 1 to labels_spam_vector only when wrong language is YES.
Add "unreadable": 1 to labels_spam_vector only when unreadable is YES.
Do not repeat the content in your answer."#;
