//! Instruction templates for each pipeline stage
//!
//! Templates use `${name}` placeholders filled by [`render`].

pub const EXTRACTION_INSTRUCTION: &str = r#"You are an expert fact-checking assistant.

Extract every factual claim stated in the text that could be checked against public sources.
- Only include claims that are actually present in the text.
- Rewrite each claim so that it can be understood on its own.
- Ignore opinions, advice, questions, predictions and fiction.

If the text contains no verifiable claims, return an empty list."#;

pub const VERIFIABILITY_INSTRUCTION: &str = r#"Decide whether the claim below can be verified with publicly available evidence such as news reports, reference works or official statistics.

Opinions, subjective judgments, predictions about the future and private facts are not verifiable.

Set is_verifiable to true only if the claim can be checked."#;

pub const PLANNING_INSTRUCTION: &str = r#"You plan how to fact-check a claim using web searches.

Produce between 1 and ${max_steps} short steps. Each step describes one thing to search for and how its answer helps confirm or refute the claim. Order the steps so that later steps can build on earlier findings."#;

pub const RESEARCH_INSTRUCTION: &str = r#"You are researching the claim: "${claim}"

Current task: ${step}

Use the web_search tool to gather evidence for this task. You may perform at most ${max_searches} web searches. When you are done, summarise what you found and cite the URL of every source you rely on."#;

pub const SYNTHESIS_INSTRUCTION: &str = r#"You are given research notes gathered while fact-checking a claim.

- Rate how truthful the claim is on a scale from 1 (certainly false) to 10 (certainly true).
- List the URLs of the sources that support your rating. Only use URLs that appear in the notes.
- Explain the rating in two or three sentences.

If the notes contain no usable evidence, give a cautious middle score, list no sources and say so in the explanation."#;

/// Separator appended after each step's research note
pub const RESEARCH_SEPARATOR: &str = "\n\n---\n\n";

/// Replace `${name}` placeholders with their values in one pass over the
/// template. Inserted values are never rescanned; unknown placeholders are
/// kept as written.
pub fn render(template: &str, variables: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            rest = &rest[start..];
            break;
        };

        let name = &after[..end];
        match variables.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Input submitted to the synthesis call
pub fn synthesis_input(claim: &str, research: &str) -> String {
    format!("Claim: {}\n\nResearch notes:\n{}", claim, research)
}
