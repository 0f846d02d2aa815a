// src/session/input.rs
// =============================================================================
// Parses one line typed at the review prompt.
//
// Lines starting with '/' are commands:
//   /help  /show  /history  /save [DIR]  /preview  /reset  /quit
//
// Anything else is feedback for the model, optionally led by #tags that
// name what the feedback is about:
//   #layout #performance make the sidebar collapsible
// A leading word like #ff0000 that names no category is part of the text.
// =============================================================================

use std::path::PathBuf;

use super::state::FeedbackCategory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Help,
    Show,
    History,
    Save(Option<PathBuf>),
    Preview,
    Reset,
    Quit,
    Feedback {
        categories: Vec<FeedbackCategory>,
        details: String,
    },
}

const COMMANDS: &str = "\
Commands:
  /show          print the current code
  /history       list the feedback given so far
  /save [DIR]    write the current version to DIR (default: output dir)
  /preview       run the code in a sandboxed child process (if allowed)
  /reset         start over and regenerate from the repository files
  /quit          leave the session";

pub fn help() -> String {
    let tags: Vec<String> = FeedbackCategory::ALL
        .iter()
        .map(|category| format!("#{} ({})", category.tag(), category))
        .collect();

    format!(
        "Type feedback to improve the code, optionally tagged with:\n  {}\n  \
         e.g. #layout move the filters into the sidebar\n\n{}",
        tags.join(", "),
        COMMANDS
    )
}

pub fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }

    if let Some(command) = line.strip_prefix('/') {
        let mut words = command.split_whitespace();
        let name = words.next().unwrap_or_default();
        let argument = words.next();
        if words.next().is_some() {
            return Err(format!("/{} takes at most one argument", name));
        }

        return match (name, argument) {
            ("help" | "h" | "?", None) => Ok(Input::Help),
            ("show", None) => Ok(Input::Show),
            ("history", None) => Ok(Input::History),
            ("save", dir) => Ok(Input::Save(dir.map(PathBuf::from))),
            ("preview", None) => Ok(Input::Preview),
            ("reset", None) => Ok(Input::Reset),
            ("quit" | "exit" | "q", None) => Ok(Input::Quit),
            (_, Some(_)) if is_known(name) => Err(format!("/{} takes no arguments", name)),
            _ => Err(format!("unknown command '/{}' (try /help)", name)),
        };
    }

    // Leading #tags are categories, the rest of the line is the feedback
    let mut categories = Vec::new();
    let mut rest = line;
    while let Some(tagged) = rest.strip_prefix('#') {
        let (tag, remainder) = tagged
            .split_once(char::is_whitespace)
            .unwrap_or((tagged, ""));
        let Ok(category) = tag.parse::<FeedbackCategory>() else {
            break;
        };
        if !categories.contains(&category) {
            categories.push(category);
        }
        rest = remainder.trim_start();
    }

    Ok(Input::Feedback {
        categories,
        details: rest.to_string(),
    })
}

fn is_known(name: &str) -> bool {
    matches!(
        name,
        "help" | "h" | "?" | "show" | "history" | "preview" | "reset" | "quit" | "exit" | "q"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands() {
        assert_eq!(parse_input("  "), Ok(Input::Empty));
        assert_eq!(parse_input("/show"), Ok(Input::Show));
        assert_eq!(parse_input("/quit"), Ok(Input::Quit));
        assert_eq!(parse_input("/save"), Ok(Input::Save(None)));
        assert_eq!(
            parse_input("/save out/ui"),
            Ok(Input::Save(Some(PathBuf::from("out/ui"))))
        );
        assert!(parse_input("/show now").is_err());
        assert!(parse_input("/deploy").is_err());
        assert_eq!(
            parse_input("/save out dir"),
            Err("/save takes at most one argument".to_string())
        );
    }

    #[test]
    fn test_help_lists_every_tag() {
        let text = help();
        for category in FeedbackCategory::ALL {
            assert!(text.contains(&format!("#{}", category.tag())));
        }
        assert!(text.contains("/preview"));
    }

    #[test]
    fn test_plain_feedback() {
        assert_eq!(
            parse_input("use a dark theme"),
            Ok(Input::Feedback {
                categories: vec![],
                details: "use a dark theme".to_string(),
            })
        );
    }

    #[test]
    fn test_tagged_feedback() {
        assert_eq!(
            parse_input("#layout #perf #layout cache the chart, widen it"),
            Ok(Input::Feedback {
                categories: vec![FeedbackCategory::LayoutAndDesign, FeedbackCategory::Performance],
                details: "cache the chart, widen it".to_string(),
            })
        );
    }

    #[test]
    fn test_tags_only_leave_details_empty() {
        assert_eq!(
            parse_input("#docs"),
            Ok(Input::Feedback {
                categories: vec![FeedbackCategory::Documentation],
                details: String::new(),
            })
        );
    }

    #[test]
    fn test_hash_inside_feedback_is_text() {
        let parsed = parse_input("make the header color #ff0000").unwrap();
        assert_eq!(
            parsed,
            Input::Feedback {
                categories: vec![],
                details: "make the header color #ff0000".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_leading_tag_stays_in_feedback() {
        assert_eq!(
            parse_input("#ff0000 is too bright"),
            Ok(Input::Feedback {
                categories: vec![],
                details: "#ff0000 is too bright".to_string(),
            })
        );
        assert_eq!(
            parse_input("#design #ff0000 is too bright"),
            Ok(Input::Feedback {
                categories: vec![FeedbackCategory::LayoutAndDesign],
                details: "#ff0000 is too bright".to_string(),
            })
        );
    }
}
