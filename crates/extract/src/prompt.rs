pub fn build_recognition_prompt(contract_text: &str) -> String {
    format!(
        r#"Identify the organizations and people named in the following contract text.

INSTRUCTIONS:
1. List every company, institution or natural person mentioned as a party, signatory or witness
2. Copy each name exactly as it appears in the text
3. Output ONLY valid JSON, nothing else
4. Use the exact schema below

SCHEMA:
{{
  "entities": [
    {{"text": "Exact Name", "category": "ORGANIZATION|PERSON"}}
  ]
}}

RULES:
- Category must be one of: ORGANIZATION, PERSON
- Do not list clause titles, contract roles (CONTRATANTE, CONTRATADO) or legal terms
- Output ONLY the JSON object, no markdown, no explanations

TEXT:
{}

JSON OUTPUT:"#,
        contract_text
    )
}

pub fn build_retry_prompt(invalid_json: &str) -> String {
    format!(
        r#"The following JSON is invalid:

{}

Fix this JSON. Output only valid JSON with no markdown formatting, no code blocks, no explanations.
Just the raw JSON object."#,
        invalid_json
    )
}
