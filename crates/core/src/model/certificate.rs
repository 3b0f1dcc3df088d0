use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

pub const CERTIFICATE_ID_PREFIX: &str = "LS-";
pub const CERTIFICATE_ID_LEN: usize = 8;
/// Characters a certificate id body is drawn from.
pub const CERTIFICATE_ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const UNKNOWN_COURSE: &str = "Unknown Course";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CertificateError {
    #[error("invalid certificate id: {0}")]
    InvalidId(String),

    #[error("Enter your name to download the certificate.")]
    MissingStudentName,

    #[error("Course name is not available yet.")]
    MissingCourseName,
}

//
// ─── ID ────────────────────────────────────────────────────────────────────────
//

/// `LS-` followed by eight uppercase alphanumerics. Generated on the client
/// and never registered anywhere.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CertificateId(String);

impl CertificateId {
    /// Builds an id from its eight-character body.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::InvalidId` unless `body` is exactly eight
    /// characters from [`CERTIFICATE_ID_ALPHABET`].
    pub fn from_body(body: &str) -> Result<Self, CertificateError> {
        let valid = body.len() == CERTIFICATE_ID_LEN
            && body.bytes().all(|b| CERTIFICATE_ID_ALPHABET.contains(&b));
        if !valid {
            return Err(CertificateError::InvalidId(body.to_owned()));
        }
        Ok(Self(format!("{CERTIFICATE_ID_PREFIX}{body}")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CertificateId({})", self.0)
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CertificateId {
    type Err = CertificateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix(CERTIFICATE_ID_PREFIX)
            .ok_or_else(|| CertificateError::InvalidId(s.to_owned()))?;
        Self::from_body(body).map_err(|_| CertificateError::InvalidId(s.to_owned()))
    }
}

//
// ─── CERTIFICATE ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub student_name: String,
    pub course_name: String,
    pub completion_date: NaiveDate,
    pub id: CertificateId,
}

impl Certificate {
    #[must_use]
    pub fn new(course_name: impl Into<String>, completion_date: NaiveDate, id: CertificateId) -> Self {
        Self {
            student_name: String::new(),
            course_name: course_name.into(),
            completion_date,
            id,
        }
    }

    /// Download needs both a student and a course name.
    #[must_use]
    pub fn can_download(&self) -> bool {
        self.ensure_downloadable().is_ok()
    }

    /// # Errors
    ///
    /// Returns which of the two names is still empty.
    pub fn ensure_downloadable(&self) -> Result<(), CertificateError> {
        if self.student_name.is_empty() {
            return Err(CertificateError::MissingStudentName);
        }
        if self.course_name.is_empty() {
            return Err(CertificateError::MissingCourseName);
        }
        Ok(())
    }

    /// `<student>-Certificate.svg`, with the name reduced to a single safe
    /// path component.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}-Certificate.svg", file_stem(&self.student_name))
    }

    /// Completion date as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_label(&self) -> String {
        self.completion_date.format("%Y-%m-%d").to_string()
    }

    /// Renders the certificate as a standalone SVG document.
    #[must_use]
    pub fn render_svg(&self) -> String {
        let student = or_placeholder(&self.student_name, "[Student Name]");
        let course = or_placeholder(&self.course_name, "[Course Name]");
        let date = self.date_label();
        let id = or_placeholder(self.id.as_str(), "[Unique ID Number]");

        let mut svg = String::with_capacity(4096);
        // write! into a String cannot fail
        let _ = write!(
            svg,
            r##"<svg viewBox="0 0 1000 707" xmlns="http://www.w3.org/2000/svg">
<rect width="1000" height="707" fill="#fafafa"/>
<pattern id="grid" width="20" height="20" patternUnits="userSpaceOnUse"><path d="M 20 0 L 0 0 0 20" fill="none" stroke="#f0f0f0" stroke-width="1"/></pattern>
<rect width="1000" height="707" fill="url(#grid)"/>
<rect x="40" y="40" width="920" height="627" fill="none" stroke="#d4af37" stroke-width="3"/>
<rect x="50" y="50" width="900" height="607" fill="none" stroke="#d4af37" stroke-width="1"/>
<path d="M 40,40 L 40,100 L 100,40 Z" fill="#d4af37" opacity="0.7"/>
<path d="M 960,40 L 960,100 L 900,40 Z" fill="#d4af37" opacity="0.7"/>
<path d="M 40,667 L 40,607 L 100,667 Z" fill="#d4af37" opacity="0.7"/>
<path d="M 960,667 L 960,607 L 900,667 Z" fill="#d4af37" opacity="0.7"/>
<text x="500" y="100" font-family="Arial, sans-serif" font-size="28" font-weight="bold" text-anchor="middle" fill="#333">LEARNINGSTACK</text>
<text x="500" y="170" font-family="Georgia, serif" font-size="38" font-weight="bold" text-anchor="middle" fill="#333">Certificate of Achievement</text>
<text x="500" y="171" font-family="Georgia, serif" font-size="38" font-weight="bold" text-anchor="middle" fill="#888" opacity="0.3">Certificate of Achievement</text>
<path d="M 200,135 L 800,135" stroke="#d4af37" stroke-width="2" stroke-dasharray="5,3"/>
<path d="M 200,180 L 800,180" stroke="#d4af37" stroke-width="2" stroke-dasharray="5,3"/>
<text x="500" y="225" font-family="Arial, sans-serif" font-size="18" font-style="italic" text-anchor="middle" fill="#555">Empowering Futures Through Education</text>
<text x="500" y="280" font-family="Georgia, serif" font-size="20" text-anchor="middle" fill="#333">This is to certify that</text>
<line x1="300" y1="330" x2="700" y2="330" stroke="#333" stroke-width="1"/>
<text x="500" y="320" font-family="Georgia, serif" font-size="22" font-weight="bold" text-anchor="middle" fill="#333">{student}</text>
<text x="500" y="370" font-family="Georgia, serif" font-size="20" text-anchor="middle" fill="#333">has successfully completed the</text>
<line x1="300" y1="420" x2="700" y2="420" stroke="#333" stroke-width="1"/>
<text x="500" y="410" font-family="Georgia, serif" font-size="22" font-weight="bold" text-anchor="middle" fill="#333">{course}</text>
<text x="500" y="460" font-family="Georgia, serif" font-size="16" text-anchor="middle" fill="#333"><tspan x="500" y="460">This achievement signifies the participant’s ability to understand, analyze, and apply </tspan><tspan x="500" y="485">the knowledge delivered throughout the course.</tspan></text>
<text x="200" y="550" font-family="Arial, sans-serif" font-size="16" font-weight="bold" fill="#333">Date of Completion:</text>
<text x="200" y="575" font-family="Arial, sans-serif" font-size="16" fill="#333">{date}</text>
<line x1="185" y1="590" x2="350" y2="590" stroke="#333" stroke-width="1"/>
<text x="200" y="615" font-family="Arial, sans-serif" font-size="16" font-weight="bold" fill="#333">Certificate ID:</text>
<text x="200" y="640" font-family="Arial, sans-serif" font-size="16" fill="#333">{id}</text>
<line x1="500" y1="530" x2="500" y2="650" stroke="#d4af37" stroke-width="1" opacity="0.5"/>
<text x="750" y="550" font-family="Georgia, serif" font-size="16" font-weight="bold" text-anchor="middle" fill="#333">Awarded By:</text>
<text x="750" y="575" font-family="Georgia, serif" font-size="16" font-weight="bold" text-anchor="middle" fill="#333">Learningstack Education Technologies</text>
<line x1="650" y1="590" x2="850" y2="590" stroke="#333" stroke-width="1"/>
<text x="750" y="615" font-family="Arial, sans-serif" font-size="16" font-style="italic" text-anchor="middle" fill="#555">Signature</text>
<circle cx="500" cy="353.5" r="250.5" fill="none" stroke="#d4af37" stroke-width="1" opacity="0.5"/>
<circle cx="500" cy="353.5" r="200.5" fill="none" stroke="#d4af37" stroke-width="1" opacity="0.5"/>
<text x="500" y="353.5" font-family="Arial, sans-serif" font-size="16" font-weight="bold" text-anchor="middle" fill="#d4af37" opacity="0.5">LEARNINGSTACK</text>
<path d="M 200,510 L 800,510" stroke="#d4af37" stroke-width="2" stroke-dasharray="5,3"/>
</svg>
"##,
            student = escape_xml(student),
            course = escape_xml(course),
            date = escape_xml(&date),
            id = escape_xml(id),
        );
        svg
    }
}

/// Separators, reserved and control characters become `_`. Leading dots
/// are dropped so the stem never names a parent or hidden entry.
fn file_stem(name: &str) -> String {
    let mapped: String = name
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect();
    let stem = mapped.trim().trim_start_matches('.').trim_end_matches(['.', ' ']);
    if stem.is_empty() {
        "Student".to_owned()
    } else {
        stem.to_owned()
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn certificate() -> Certificate {
        Certificate::new(
            "Rust Basics",
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            CertificateId::from_body("AB12CD34").unwrap(),
        )
    }

    #[test]
    fn id_body_must_be_eight_uppercase_alphanumerics() {
        assert_eq!(CertificateId::from_body("AB12CD34").unwrap().as_str(), "LS-AB12CD34");
        assert!(CertificateId::from_body("ab12cd34").is_err());
        assert!(CertificateId::from_body("AB12CD3").is_err());
        assert!(CertificateId::from_body("AB12-D34").is_err());
    }

    #[test]
    fn id_parses_with_prefix() {
        let id: CertificateId = "LS-ZZ00ZZ00".parse().unwrap();
        assert_eq!(id.to_string(), "LS-ZZ00ZZ00");
        assert!("ZZ00ZZ00".parse::<CertificateId>().is_err());
    }

    #[test]
    fn download_requires_both_names() {
        let mut cert = certificate();
        assert_eq!(cert.ensure_downloadable(), Err(CertificateError::MissingStudentName));
        cert.student_name = "Ada".into();
        assert!(cert.can_download());
        cert.course_name.clear();
        assert!(!cert.can_download());
    }

    #[test]
    fn file_name_uses_student_name() {
        let mut cert = certificate();
        cert.student_name = "Ada Lovelace".into();
        assert_eq!(cert.file_name(), "Ada Lovelace-Certificate.svg");
    }

    #[test]
    fn file_name_stays_a_single_component() {
        let mut cert = certificate();
        for (name, expected) in [
            ("AC/DC", "AC_DC-Certificate.svg"),
            ("../x", "_x-Certificate.svg"),
            ("/etc/abs", "_etc_abs-Certificate.svg"),
            ("C:\\Users\\me", "C__Users_me-Certificate.svg"),
            ("..", "Student-Certificate.svg"),
            ("a\0b", "a_b-Certificate.svg"),
        ] {
            cert.student_name = name.into();
            let file_name = cert.file_name();
            assert_eq!(file_name, expected, "for {name:?}");
            assert_eq!(std::path::Path::new(&file_name).components().count(), 1);
        }
    }

    #[test]
    fn svg_contains_fields_and_placeholders() {
        let cert = certificate();
        let svg = cert.render_svg();
        assert!(svg.starts_with(r#"<svg viewBox="0 0 1000 707""#));
        assert!(svg.contains(">[Student Name]</text>"));
        assert!(svg.contains(">Rust Basics</text>"));
        assert!(svg.contains(">2024-03-09</text>"));
        assert!(svg.contains(">LS-AB12CD34</text>"));
    }

    #[test]
    fn svg_escapes_interpolated_text() {
        let mut cert = certificate();
        cert.student_name = "<Bob & \"Al\">".into();
        let svg = cert.render_svg();
        assert!(svg.contains("&lt;Bob &amp; &quot;Al&quot;&gt;"));
        assert!(!svg.contains("<Bob"));
    }
}
