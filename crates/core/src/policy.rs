//! Bucket access policies

use serde::Serialize;

use crate::error::Result;

const POLICY_VERSION: &str = "2012-10-17";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PolicyDocument<'a> {
    version: &'a str,
    statement: Vec<Statement>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Statement {
    sid: &'static str,
    effect: &'static str,
    principal: &'static str,
    action: Vec<&'static str>,
    resource: Vec<String>,
}

/// Build the policy document that lets anyone read every object in `bucket`
pub fn public_read_policy(bucket: &str) -> Result<String> {
    let document = PolicyDocument {
        version: POLICY_VERSION,
        statement: vec![Statement {
            sid: "PublicReadGetObject",
            effect: "Allow",
            principal: "*",
            action: vec!["s3:GetObject"],
            resource: vec![format!("arn:aws:s3:::{bucket}/*")],
        }],
    };

    Ok(serde_json::to_string_pretty(&document)?)
}
