//! Conversation templates: a named formatting rule turning a list of dialogue
//! turns into a single prompt string plus a stop sequence.

/// How the turns of a conversation are glued together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorStyle {
    /// `system sep role": "msg sep ...`
    Single,
    /// Like [`Self::Single`] but alternating between `sep` and `sep2`.
    Two,
    /// Llama 2 instruct format: user turns wrapped in `[INST] .. [/INST]`.
    Llama2,
    /// Bare messages joined by the separators, no role markers.
    Plain,
}

/// A single-threaded chat history plus the rules to render it into a prompt.
///
/// Obtained from [`conv_template`]; each call returns a fresh value, so
/// appending messages never affects other users of the template.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub name: String,
    pub system: String,
    pub roles: [String; 2],
    pub messages: Vec<(String, Option<String>)>,
    pub sep_style: SeparatorStyle,
    pub sep: String,
    /// Secondary separator. Also used as the generation stop sequence.
    pub sep2: Option<String>,
}

impl Conversation {
    /// Append one turn. A `None` message renders as a bare role marker, which
    /// cues the model to continue as that role.
    pub fn append_message(&mut self, role: impl Into<String>, message: Option<String>) {
        self.messages.push((role.into(), message));
    }

    /// Render the accumulated turns into the prompt string for this template.
    pub fn get_prompt(&self) -> String {
        let sep2 = self.sep2.as_deref().unwrap_or_default();
        match self.sep_style {
            SeparatorStyle::Single => {
                let mut ret = format!("{}{}", self.system, self.sep);
                for (role, message) in &self.messages {
                    match message {
                        Some(message) => {
                            ret.push_str(&format!("{role}: {message}{}", self.sep));
                        }
                        None => ret.push_str(&format!("{role}:")),
                    }
                }
                ret
            }
            SeparatorStyle::Two => {
                let seps = [self.sep.as_str(), sep2];
                let mut ret = format!("{}{}", self.system, seps[0]);
                for (i, (role, message)) in self.messages.iter().enumerate() {
                    match message {
                        Some(message) => {
                            ret.push_str(&format!("{role}: {message}{}", seps[i % 2]));
                        }
                        None => ret.push_str(&format!("{role}:")),
                    }
                }
                ret
            }
            SeparatorStyle::Llama2 => {
                let wrap_sys = |system: &str| {
                    if system.is_empty() {
                        String::new()
                    } else {
                        format!("<<SYS>>\n{system}\n<</SYS>>\n\n")
                    }
                };
                let mut ret = String::new();
                for (i, (_role, message)) in self.messages.iter().enumerate() {
                    let Some(message) = message else { continue };
                    let message = if i == 0 {
                        format!("{}{message}", wrap_sys(&self.system))
                    } else {
                        message.clone()
                    };
                    if i % 2 == 0 {
                        ret.push_str(&self.sep);
                        ret.push_str(&format!("[INST] {message} [/INST]"));
                    } else {
                        ret.push_str(&format!(" {message} {sep2}"));
                    }
                }
                if !self.sep.is_empty() {
                    if let Some(stripped) = ret.strip_prefix(&self.sep) {
                        return stripped.to_string();
                    }
                }
                ret
            }
            SeparatorStyle::Plain => {
                let seps = [self.sep.as_str(), sep2];
                let mut ret = self.system.clone();
                for (i, (_role, message)) in self.messages.iter().enumerate() {
                    if let Some(message) = message {
                        ret.push_str(&format!("{message}{}", seps[i % 2]));
                    }
                }
                ret
            }
        }
    }
}

/// Look up a conversation template by name, returning a fresh copy.
pub fn conv_template(name: &str) -> Option<Conversation> {
    let conv = match name {
        "mistral_instruct" => Conversation {
            name: "mistral_instruct".to_string(),
            system: String::new(),
            roles: ["USER".to_string(), "ASSISTANT".to_string()],
            messages: Vec::new(),
            sep_style: SeparatorStyle::Llama2,
            sep: String::new(),
            sep2: Some("</s>".to_string()),
        },
        "vicuna_v1" => Conversation {
            name: "vicuna_v1".to_string(),
            system: "A chat between a curious user and an artificial intelligence assistant. \
                     The assistant gives helpful, detailed, and polite answers to the user's questions."
                .to_string(),
            roles: ["USER".to_string(), "ASSISTANT".to_string()],
            messages: Vec::new(),
            sep_style: SeparatorStyle::Two,
            sep: " ".to_string(),
            sep2: Some("</s>".to_string()),
        },
        "llava_plain" => Conversation {
            name: "llava_plain".to_string(),
            system: String::new(),
            roles: [String::new(), String::new()],
            messages: Vec::new(),
            sep_style: SeparatorStyle::Plain,
            sep: "\n".to_string(),
            sep2: None,
        },
        _ => return None,
    };
    Some(conv)
}
