// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Access control policies shared by buckets and objects.
//!
//! - [ACL](https://cloud.tencent.com/document/product/436/30752)

use crate::options::{AclHeaderOptions, HeaderOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    #[serde(rename = "ID", alias = "uin")]
    pub id: String,
    #[serde(rename = "DisplayName", skip_serializing_if = "String::is_empty")]
    pub display_name: String,
}

/// Body of `GET ?acl` and `PUT ?acl`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename = "AccessControlPolicy")]
pub struct AccessControlPolicy {
    #[serde(rename = "Owner")]
    pub owner: Owner,
    #[serde(rename = "AccessControlList")]
    pub access_control_list: AccessControlList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessControlList {
    #[serde(rename = "Grant")]
    pub grants: Vec<Grant>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grant {
    #[serde(rename = "Grantee")]
    pub grantee: Grantee,
    /// `READ`, `WRITE` or `FULL_CONTROL`.
    #[serde(rename = "Permission")]
    pub permission: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grantee {
    /// `CanonicalUser` or `Group`.
    #[serde(rename = "@xsi:type", alias = "@type", skip_serializing_if = "String::is_empty")]
    pub grantee_type: String,
    #[serde(rename = "ID", alias = "uin", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "DisplayName", skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(rename = "URI", skip_serializing_if = "String::is_empty")]
    pub uri: String,
}

/// Options of `PUT ?acl` on buckets and objects.
///
/// The acl can be set with headers or with a body, not both. When `body`
/// is set the headers are dropped.
#[derive(Debug, Clone, Default)]
pub struct PutAclOptions {
    pub header: Option<AclHeaderOptions>,
    pub body: Option<AccessControlPolicy>,
}

impl PutAclOptions {
    /// Header options to send, `None` when the body takes precedence.
    pub(crate) fn effective_header(&self) -> Option<&dyn HeaderOptions> {
        match (&self.body, &self.header) {
            (Some(_), _) | (None, None) => None,
            (None, Some(header)) => Some(header),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_access_control_policy() {
        let xml = r#"<AccessControlPolicy>
  <Owner>
    <ID>qcs::cam::uin/100000000001:uin/100000000001</ID>
    <DisplayName>qcs::cam::uin/100000000001:uin/100000000001</DisplayName>
  </Owner>
  <AccessControlList>
    <Grant>
      <Grantee xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="CanonicalUser">
        <ID>qcs::cam::uin/100000000001:uin/100000000001</ID>
        <DisplayName>qcs::cam::uin/100000000001:uin/100000000001</DisplayName>
      </Grantee>
      <Permission>FULL_CONTROL</Permission>
    </Grant>
    <Grant>
      <Grantee xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="CanonicalUser">
        <ID>qcs::cam::uin/100000000001:uin/100000000011</ID>
      </Grantee>
      <Permission>READ</Permission>
    </Grant>
  </AccessControlList>
</AccessControlPolicy>"#;

        let acl: AccessControlPolicy = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(acl.owner.id, "qcs::cam::uin/100000000001:uin/100000000001");
        assert_eq!(acl.access_control_list.grants.len(), 2);

        let grant = &acl.access_control_list.grants[1];
        assert_eq!(grant.permission, "READ");
        assert_eq!(
            grant.grantee.id,
            "qcs::cam::uin/100000000001:uin/100000000011"
        );
        assert_eq!(grant.grantee.display_name, "");
    }

    #[test]
    fn test_put_acl_options_body_wins() {
        let header = AclHeaderOptions {
            x_cos_acl: Some("private".to_string()),
            ..Default::default()
        };

        let opts = PutAclOptions {
            header: Some(header.clone()),
            body: None,
        };
        assert_eq!(
            opts.effective_header().map(|h| h.header_pairs()),
            Some(vec![("x-cos-acl".to_string(), "private".to_string())])
        );

        let opts = PutAclOptions {
            header: Some(header),
            body: Some(AccessControlPolicy::default()),
        };
        assert!(opts.effective_header().is_none());
    }
}
