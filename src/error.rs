/*
 * // Copyright (c) Radzivon Bartoshyk 2/2026. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use std::fmt::{Display, Formatter};

/// Structural failure while parsing an EFT container (§7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    message: String,
    offset: Option<usize>,
    record_type: Option<u32>,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
            offset: None,
            record_type: None,
        }
    }

    pub(crate) fn at(message: impl Into<String>, offset: usize) -> Self {
        ParseError {
            message: message.into(),
            offset: Some(offset),
            record_type: None,
        }
    }

    pub(crate) fn with_record_type(mut self, record_type: u32) -> Self {
        self.record_type = Some(record_type);
        self
    }

    /// Byte offset into the input at which the failure was detected, when known.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// The ANSI/NIST record type involved in the failure, when known.
    pub fn record_type(&self) -> Option<u32> {
        self.record_type
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if let Some(offset) = self.offset {
            f.write_fmt(format_args!(" (at offset {offset})"))?;
        }
        if let Some(record_type) = self.record_type {
            f.write_fmt(format_args!(" (record type {record_type})"))?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Any WSQ-level decode failure (§7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    message: String,
    offset: Option<usize>,
}

impl DecodeError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        DecodeError {
            message: message.into(),
            offset: None,
        }
    }

    pub(crate) fn at(message: impl Into<String>, offset: usize) -> Self {
        DecodeError {
            message: message.into(),
            offset: Some(offset),
        }
    }

    /// Byte offset into the WSQ payload at which decoding failed, when known.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if let Some(offset) = self.offset {
            f.write_fmt(format_args!(" (at offset {offset})"))?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeError {}

/// Bad caller input to one of the helper functions in [`crate::helpers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        ValidationError {
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Umbrella over all three error kinds so a caller can catch broadly
/// without caring which subsystem failed (§7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    Parse(ParseError),
    Decode(DecodeError),
    Validation(ValidationError),
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::Parse(e) => Display::fmt(e, f),
            CoreError::Decode(e) => Display::fmt(e, f),
            CoreError::Validation(e) => Display::fmt(e, f),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<ParseError> for CoreError {
    fn from(e: ParseError) -> Self {
        CoreError::Parse(e)
    }
}

impl From<DecodeError> for CoreError {
    fn from(e: DecodeError) -> Self {
        CoreError::Decode(e)
    }
}

impl From<ValidationError> for CoreError {
    fn from(e: ValidationError) -> Self {
        CoreError::Validation(e)
    }
}
