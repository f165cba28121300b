/// Used whenever no persona text can be obtained.
pub const DEFAULT_PERSONA_PROMPT: &str = "You are a professional code analysis assistant.";

const ANALYSIS_RUBRIC: &str = "Please analyze it from the following aspects:
1. **Programming language**: identify the programming language the code is written in
2. **Functionality**: explain the main purpose and behavior of the code
3. **Time complexity**: analyze the time complexity of the code (Big O notation)
4. **Space complexity**: analyze the space complexity of the code (Big O notation)
5. **Potential defects**: point out errors, bugs or latent problems the code may have
6. **Improvement suggestions**: give concrete suggestions for optimizing and improving the code";

/// Prompt sent to the provider for one analysis request.
#[derive(Debug, Clone)]
pub struct AnalysisPrompt {
    pub code_content: String,
    pub persona_prompt: Option<String>,
}

impl AnalysisPrompt {
    pub fn new(code_content: impl Into<String>, persona_prompt: Option<String>) -> Self {
        Self {
            code_content: code_content.into(),
            persona_prompt: persona_prompt.filter(|p| !p.trim().is_empty()),
        }
    }

    pub fn to_prompt(&self) -> String {
        match &self.persona_prompt {
            Some(persona) => format!(
                "\nYour role:\n{persona}\n\n\
                 Now, acting as a professional code analyst, please analyze the following code in detail:\n\n\
                 ```\n{code}\n```\n\n\
                 {rubric}\n\n\
                 Please answer in a clear and friendly way, keeping the analysis professional and easy to understand.\n",
                persona = persona,
                code = self.code_content,
                rubric = ANALYSIS_RUBRIC,
            ),
            None => format!(
                "\nPlease analyze the following code in detail:\n\n\
                 ```\n{code}\n```\n\n\
                 {rubric}\n\n\
                 Please answer in a clear and professional way.\n",
                code = self.code_content,
                rubric = ANALYSIS_RUBRIC,
            ),
        }
    }

    pub fn estimate_tokens(&self) -> usize {
        // Rough estimate: ~4 characters per token
        self.to_prompt().len() / 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_template() {
        let prompt = AnalysisPrompt::new("print(1)", Some("You are a pirate.".to_string())).to_prompt();
        assert!(prompt.contains("Your role:\nYou are a pirate.\n"));
        assert!(prompt.contains("```\nprint(1)\n```"));
        assert!(prompt.contains("friendly"));
    }

    #[test]
    fn test_plain_template() {
        let prompt = AnalysisPrompt::new("print(1)", None).to_prompt();
        assert!(!prompt.contains("Your role:"));
        assert!(prompt.starts_with("\nPlease analyze the following code in detail:"));
        assert!(prompt.contains("```\nprint(1)\n```"));
        assert!(prompt.ends_with("Please answer in a clear and professional way.\n"));
    }

    #[test]
    fn test_blank_persona_falls_back_to_plain() {
        let prompt = AnalysisPrompt::new("x = 1", Some("   ".to_string())).to_prompt();
        assert!(!prompt.contains("Your role:"));
    }

    #[test]
    fn test_rubric_is_numbered_in_order() {
        for persona in [None, Some(DEFAULT_PERSONA_PROMPT.to_string())] {
            let prompt = AnalysisPrompt::new("x = 1", persona).to_prompt();
            let positions: Vec<usize> = [
                "1. **Programming language**",
                "2. **Functionality**",
                "3. **Time complexity**",
                "4. **Space complexity**",
                "5. **Potential defects**",
                "6. **Improvement suggestions**",
            ]
            .iter()
            .map(|item| prompt.find(item).expect("rubric item missing"))
            .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
