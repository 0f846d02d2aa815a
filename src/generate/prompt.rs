// src/generate/prompt.rs
// =============================================================================
// Prompt templates for generating and revising a Streamlit UI.
// =============================================================================

use crate::github::MatchedFile;

pub const ASSISTANT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

pub const GENERATOR_SYSTEM_PROMPT: &str = "You are an AI agent specialized in creating user interfaces.";

const GENERATION_TEMPLATE: &str = "\
Repository files:
{frontend_files}

Create a modern, responsive Streamlit UI for this repository that includes:
1. A clean and professional layout
2. Necessary input components and forms
3. Data visualization sections if needed
4. Interactive elements and navigation
5. Error handling and user feedback

The UI should match the repository's functionality and purpose.
Generate complete, runnable Streamlit code.

Important: Include all necessary imports and make sure the code is self-contained.
Use modern Streamlit features like st.tabs(), st.columns(), etc.
";

/// The generation prompt, with the files embedded as pretty-printed JSON.
pub fn generation_prompt(files: &[MatchedFile]) -> Result<String, serde_json::Error> {
    let files_json = serde_json::to_string_pretty(files)?;
    Ok(GENERATION_TEMPLATE.replace("{frontend_files}", &files_json))
}

pub fn improvement_prompt(code: &str, feedback: &str) -> String {
    format!(
        "Original Code:\n```python\n{}\n```\n\n\
         Human Feedback:\n{}\n\n\
         Please improve the code based on the feedback provided.\n\
         Ensure the code is complete and ready to run.\n",
        code,
        feedback.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_prompt_embeds_files_as_json() {
        let files = vec![MatchedFile {
            path: "src/app.js".to_string(),
            content: "let x = \"y\";".to_string(),
            extension: ".js".to_string(),
        }];
        let prompt = generation_prompt(&files).unwrap();

        assert!(prompt.starts_with("Repository files:\n[\n"));
        assert!(prompt.contains(r#""path": "src/app.js""#));
        assert!(prompt.contains(r#""extension": ".js""#));
        assert!(prompt.contains(r#"let x = \"y\";"#));
        assert!(!prompt.contains("{frontend_files}"));
    }

    #[test]
    fn test_improvement_prompt_fences_code() {
        let prompt = improvement_prompt("st.title('a')", "  add a sidebar\n");
        assert!(prompt.contains("```python\nst.title('a')\n```"));
        assert!(prompt.contains("Human Feedback:\nadd a sidebar\n"));
    }

    #[test]
    fn test_feedback_placeholder_text_is_not_expanded() {
        let prompt = improvement_prompt("print(1)", "keep {code} literal");
        assert!(prompt.contains("keep {code} literal"));
        assert_eq!(prompt.matches("print(1)").count(), 1);
    }
}
