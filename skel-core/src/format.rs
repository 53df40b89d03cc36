//! Configuration and templating formats.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Format used for routing, services and mapping configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// YAML (`.yml`)
    #[serde(rename = "yml", alias = "yaml")]
    Yaml,
    /// XML (`.xml`)
    Xml,
    /// Plain PHP (`.php`)
    Php,
    /// Annotations embedded in the PHP source
    Annotation,
}

impl Format {
    /// All supported formats, in the order they are offered to the user.
    pub const ALL: [Format; 4] = [Format::Yaml, Format::Xml, Format::Php, Format::Annotation];

    /// Returns the format identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Yaml => "yml",
            Format::Xml => "xml",
            Format::Php => "php",
            Format::Annotation => "annotation",
        }
    }

    /// File extension of the configuration file written for this format.
    ///
    /// Annotations have no configuration file of their own.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Format::Annotation => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yml" | "yaml" => Ok(Format::Yaml),
            "xml" => Ok(Format::Xml),
            "php" => Ok(Format::Php),
            "annotation" => Ok(Format::Annotation),
            _ => Err(format!(
                "format '{}' is not supported, expected one of: php, xml, yml, annotation",
                s
            )),
        }
    }
}

/// Format of the generated view templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFormat {
    #[default]
    Twig,
    Php,
}

impl TemplateFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateFormat::Twig => "twig",
            TemplateFormat::Php => "php",
        }
    }
}

impl fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemplateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twig" => Ok(TemplateFormat::Twig),
            "php" => Ok(TemplateFormat::Php),
            _ => Err(format!(
                "unknown template format '{}', expected 'twig' or 'php'",
                s
            )),
        }
    }
}

/// License text shipped with a generated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum License {
    #[default]
    #[serde(rename = "MIT", alias = "mit")]
    Mit,
    #[serde(rename = "LGPL", alias = "lgpl")]
    Lgpl,
}

impl License {
    pub fn as_str(&self) -> &'static str {
        match self {
            License::Mit => "MIT",
            License::Lgpl => "LGPL",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for License {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MIT" => Ok(License::Mit),
            "LGPL" | "LGPL-3.0" => Ok(License::Lgpl),
            _ => Err(format!("unknown license '{}', expected 'MIT' or 'LGPL'", s)),
        }
    }
}
