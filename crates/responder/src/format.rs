//! Reply Formatting

use crate::templates::DISCLAIMER;
use matcher::symptom_display;

/// Title-case a disease name: a cased letter following an uncased character
/// is uppercased, every other cased letter lowercased.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for c in text.chars() {
        if c.is_lowercase() || c.is_uppercase() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }
    out
}

/// 1-based numbered list, one item per line
pub fn numbered_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reply for a symptom-pass match: condition, symptoms, precautions, disclaimer
pub fn format_symptom_reply(disease: &str, symptoms: &[String], precautions: &[String]) -> String {
    let mut reply = format!(
        "Possible condition: {}\n\nSymptoms:\n{}",
        title_case(disease),
        numbered_list(symptoms.iter().map(|s| symptom_display(s)))
    );
    if !precautions.is_empty() {
        reply.push_str("\n\nPrecautions:\n");
        reply.push_str(&numbered_list(precautions));
    }
    reply.push_str("\n\n");
    reply.push_str(DISCLAIMER);
    reply
}

/// Reply for a disease-name match: precautions only, then disclaimer
pub fn format_disease_name_reply(disease: &str, precautions: &[String]) -> String {
    let mut reply = format!("Precautions for {}:", title_case(disease));
    if !precautions.is_empty() {
        reply.push('\n');
        reply.push_str(&numbered_list(precautions));
    }
    reply.push_str("\n\n");
    reply.push_str(DISCLAIMER);
    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("flu"), "Flu");
        assert_eq!(title_case("hepatitis a"), "Hepatitis A");
        assert_eq!(title_case("(vertigo) paroymsal  positional"), "(Vertigo) Paroymsal  Positional");
        assert_eq!(title_case("dimorphic hemmorhoids(piles)"), "Dimorphic Hemmorhoids(Piles)");
        assert_eq!(title_case("covid19x"), "Covid19X");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_restarts_after_uncased_letters() {
        assert_eq!(title_case("ab日cd"), "Ab日Cd");
        assert_eq!(title_case("flu日本"), "Flu日本");
    }

    #[test]
    fn test_numbered_list() {
        assert_eq!(numbered_list(["a", "b", "c"]), "1. a\n2. b\n3. c");
        assert_eq!(numbered_list(Vec::<String>::new()), "");
    }

    #[test]
    fn test_symptom_reply_layout() {
        let reply = format_symptom_reply(
            "flu",
            &strings(&["fever", "runny_nose"]),
            &strings(&["rest", "hydrate"]),
        );
        assert_eq!(
            reply,
            "Possible condition: Flu\n\n\
             Symptoms:\n1. fever\n2. runny nose\n\n\
             Precautions:\n1. rest\n2. hydrate\n\n\
             This is awareness info only. Please consult a doctor."
        );
    }

    #[test]
    fn test_symptom_reply_without_precautions() {
        let reply = format_symptom_reply("acne", &strings(&["skin_rash"]), &[]);
        assert!(!reply.contains("Precautions"));
        assert!(reply.starts_with("Possible condition: Acne"));
        assert!(reply.ends_with(DISCLAIMER));
    }

    #[test]
    fn test_disease_name_reply_layout() {
        let reply = format_disease_name_reply("common cold", &strings(&["drink vitamin c rich drinks"]));
        assert_eq!(
            reply,
            "Precautions for Common Cold:\n1. drink vitamin c rich drinks\n\n\
             This is awareness info only. Please consult a doctor."
        );
    }

    #[test]
    fn test_disease_name_reply_empty_precautions() {
        let reply = format_disease_name_reply("gerd", &[]);
        assert_eq!(reply, format!("Precautions for Gerd:\n\n{DISCLAIMER}"));
    }

    proptest! {
        #[test]
        fn prop_symptom_reply_enumerates_everything_in_order(
            symptoms in proptest::collection::vec("[a-z]{3,8}", 1..6),
            precautions in proptest::collection::vec("[a-z]{3,8}", 0..5),
        ) {
            let reply = format_symptom_reply("zzq", &symptoms, &precautions);
            let (symptom_part, precaution_part) = match reply.split_once("\n\nPrecautions:\n") {
                Some((s, p)) => (s.to_string(), p.to_string()),
                None => (reply.clone(), String::new()),
            };
            for (i, s) in symptoms.iter().enumerate() {
                let line = format!("{}. {}", i + 1, s);
                prop_assert!(symptom_part.lines().any(|l| l == line));
            }
            for (i, p) in precautions.iter().enumerate() {
                let line = format!("{}. {}", i + 1, p);
                prop_assert!(precaution_part.lines().any(|l| l == line));
            }
            prop_assert_eq!(precautions.is_empty(), precaution_part.is_empty());
            prop_assert!(reply.ends_with(DISCLAIMER));
        }
    }
}
