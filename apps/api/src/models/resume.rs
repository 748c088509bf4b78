use serde::{Deserialize, Serialize};

/// One job entry in the professional-experience section.
///
/// Produced by the document parser and never mutated afterwards; tailoring
/// builds new `Role` values instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// The `### ` line.
    pub role_header: String,
    /// The `#### ` line, when present.
    pub company_header: Option<String>,
    /// `- ` lines, verbatim including the marker.
    pub bullet_lines: Vec<String>,
    pub other_lines: Vec<String>,
}

impl Role {
    pub fn new(role_header: impl Into<String>) -> Self {
        Self {
            role_header: role_header.into(),
            ..Self::default()
        }
    }

    /// Same header, sub-header and other lines with a new set of bullets.
    pub fn with_bullets(&self, bullet_lines: Vec<String>) -> Self {
        Self {
            role_header: self.role_header.clone(),
            company_header: self.company_header.clone(),
            bullet_lines,
            other_lines: self.other_lines.clone(),
        }
    }
}

/// A parsed markdown résumé: every line plus the roles found in the
/// professional-experience section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDoc {
    pub lines: Vec<String>,
    /// Index of the `## PROFESSIONAL_EXPERIENCE` header line.
    pub prof_exp_start: Option<usize>,
    /// Index of the header that closes the section; `None` means end of document.
    pub prof_exp_end: Option<usize>,
    pub roles: Vec<Role>,
}

impl ResumeDoc {
    /// The full document text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}
