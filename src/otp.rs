//! One-time password entry state.
//!
//! The login flow collects a six digit code one slot at a time. Each update
//! returns a new snapshot, leaving the previous one untouched.
//!
//! ```text
//! input(i, digit)  -> slot i = digit, focus i+1 (stays on the last slot)
//! input(i, "")     -> slot i cleared, focus unchanged
//! backspace(i)     -> focus i-1 when slot i is already empty
//! reset()          -> all slots empty, focus 0 (after a resend)
//! ```

use thiserror::Error;

pub const OTP_LENGTH: usize = 6;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OtpError {
    #[error("Please enter a complete OTP ({filled} of {total} digits)", total = OTP_LENGTH)]
    Incomplete { filled: usize },
}

/// Where a verified user is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Admin,
    Dashboard,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Admin => "/admin",
            Destination::Dashboard => "/dashboard",
        }
    }
}

/// Emails that land on the admin area after verification.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    admin_emails: Vec<String>,
}

impl AccessPolicy {
    pub fn new<S: Into<String>>(admin_emails: impl IntoIterator<Item = S>) -> Self {
        Self {
            admin_emails: admin_emails.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_admin(&self, email: &str) -> bool {
        let email = email.trim();
        self.admin_emails.iter().any(|a| a.eq_ignore_ascii_case(email))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpState {
    digits: [Option<char>; OTP_LENGTH],
    focus: usize,
}

impl OtpState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn digit(&self, index: usize) -> Option<char> {
        self.digits.get(index).copied().flatten()
    }

    pub fn filled(&self) -> usize {
        self.digits.iter().filter(|d| d.is_some()).count()
    }

    /// Store `value` in slot `index`. Only "" or a single ASCII digit is
    /// accepted; anything else (or an out of range index) changes nothing.
    pub fn input(&self, index: usize, value: &str) -> Self {
        if index >= OTP_LENGTH {
            return self.clone();
        }
        let mut chars = value.chars();
        let digit = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) if c.is_ascii_digit() => Some(c),
            _ => return self.clone(),
        };

        let mut next = self.clone();
        next.digits[index] = digit;
        if digit.is_some() && index < OTP_LENGTH - 1 {
            next.focus = index + 1;
        }
        next
    }

    pub fn backspace(&self, index: usize) -> Self {
        let mut next = self.clone();
        if index > 0 && index < OTP_LENGTH && self.digits[index].is_none() {
            next.focus = index - 1;
        }
        next
    }

    pub fn reset(&self) -> Self {
        Self::default()
    }

    /// The full code once every slot is filled.
    pub fn code(&self) -> Option<String> {
        self.digits.iter().copied().collect()
    }

    pub fn submit(&self, email: &str, policy: &AccessPolicy) -> Result<Destination, OtpError> {
        if self.code().is_none() {
            return Err(OtpError::Incomplete {
                filled: self.filled(),
            });
        }
        Ok(if policy.is_admin(email) {
            Destination::Admin
        } else {
            Destination::Dashboard
        })
    }
}
