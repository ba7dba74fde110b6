// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `decode` command.

use serde_json::json;

use rolegate_core::SessionCodec;

use crate::cli::{DecodeArgs, OutputFormat};
use crate::error::BinResult;
use crate::EXIT_SUCCESS;

/// Decodes a credential and prints the identity it carries.
///
/// Expired or malformed credentials are reported as errors.
pub fn decode(args: &DecodeArgs) -> BinResult<i32> {
    let codec = SessionCodec::new();
    let claims = codec.decode_claims(&args.token)?;
    let identity = codec.decode(&args.token)?;
    let expires_at = claims.expires_at().map(|t| t.to_rfc3339());

    match args.format {
        OutputFormat::Text => {
            println!("ID:      {}", identity.id);
            println!("Email:   {}", identity.email);
            let roles: Vec<&str> = identity.roles.iter().map(String::as_str).collect();
            println!("Roles:   {}", roles.join(", "));
            println!("Expires: {}", expires_at.as_deref().unwrap_or("never"));
        }
        OutputFormat::Json => {
            let output = json!({
                "identity": identity,
                "expires_at": expires_at,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BinError;
    use rolegate_core::MockPersona;

    #[test]
    fn test_decode_persona() {
        let args = DecodeArgs {
            token: MockPersona::Admin.token().to_string(),
            format: OutputFormat::Json,
        };
        assert_eq!(decode(&args).unwrap(), EXIT_SUCCESS);
    }

    #[test]
    fn test_decode_malformed() {
        let args = DecodeArgs {
            token: "a.b".to_string(),
            format: OutputFormat::Text,
        };
        let err = decode(&args).unwrap_err();
        assert!(matches!(err, BinError::Decode(_)));
        assert_eq!(err.exit_code(), 5);
    }
}
