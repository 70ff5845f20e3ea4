use crate::config::{HookOptions, HookSettings};
use crate::error::HookError;

const VERSION_PLACEHOLDER: &str = "{version}";

/// Tagger options with their built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggerConfig {
    pub prefix: String,
    pub annotated: bool,
    pub sign: bool,
    /// Annotation template; `{version}` is replaced with the version.
    pub message: String,
    pub push: bool,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        TaggerConfig {
            prefix: "v".to_string(),
            annotated: true,
            sign: false,
            message: "Release {version}".to_string(),
            push: false,
        }
    }
}

impl HookSettings for TaggerConfig {
    const SECTION: &'static str = "git-tagger";

    fn from_options(options: &HookOptions) -> Result<Self, HookError> {
        let d = TaggerConfig::default();
        Ok(TaggerConfig {
            prefix: options.string("prefix", &d.prefix)?,
            annotated: options.boolean("annotated", d.annotated)?,
            sign: options.boolean("sign", d.sign)?,
            message: options.string("message", &d.message)?,
            push: options.boolean("push", d.push)?,
        })
    }
}

/// Fully derived tag for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpec {
    pub name: String,
    pub annotated: bool,
    /// Only set for annotated tags.
    pub signed: bool,
    /// Annotation text; empty for lightweight tags.
    pub message: String,
    pub push: bool,
}

impl TagSpec {
    pub fn derive(version: &str, config: &TaggerConfig) -> Self {
        let message = if config.annotated {
            config.message.replace(VERSION_PLACEHOLDER, version)
        } else {
            String::new()
        };
        TagSpec {
            name: format!("{}{version}", config.prefix),
            annotated: config.annotated,
            signed: config.annotated && config.sign,
            message,
            push: config.push,
        }
    }

    /// Arguments for `git tag` creating this tag.
    pub(crate) fn create_args(&self) -> Vec<String> {
        let mut args = vec!["tag".to_string()];
        if self.annotated {
            args.extend(["-a".to_string(), self.name.clone()]);
            args.extend(["-m".to_string(), self.message.clone()]);
            if self.signed {
                args.push("-s".to_string());
            }
        } else {
            args.push(self.name.clone());
        }
        args
    }
}
