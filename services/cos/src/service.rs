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

use crate::acl::Owner;
use crate::{Client, Response, ResultSink, SendOptions};
use http::Method;
use qcos_core::Result;
use serde::Deserialize;

/// Operations on the service, see [`Client::service`].
#[derive(Debug, Clone, Copy)]
pub struct Service<'a> {
    client: &'a Client,
}

impl<'a> Service<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List all buckets owned by the signing account.
    ///
    /// - [GET Service](https://cloud.tencent.com/document/product/436/8291)
    pub async fn get(&self) -> Result<(ListAllMyBucketsResult, Response)> {
        let mut res = ListAllMyBucketsResult::default();
        let opts = SendOptions::new(&self.client.base_url().service_url, "/", Method::GET)
            .with_auth_time(self.client.auth_time());

        let resp = self.client.send(opts, ResultSink::Xml(&mut res)).await?;
        Ok((res, resp))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename = "ListAllMyBucketsResult")]
pub struct ListAllMyBucketsResult {
    #[serde(rename = "Owner")]
    pub owner: Owner,
    #[serde(rename = "Buckets")]
    pub buckets: Buckets,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Buckets {
    #[serde(rename = "Bucket")]
    pub bucket: Vec<BucketSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BucketSummary {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "CreationDate", alias = "CreateDate")]
    pub creation_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_list_all_my_buckets() {
        let xml = r#"<ListAllMyBucketsResult>
  <Owner>
    <ID>qcs::cam::uin/100000000001:uin/100000000001</ID>
    <DisplayName>100000000001</DisplayName>
  </Owner>
  <Buckets>
    <Bucket>
      <Name>examplebucket1-1250000000</Name>
      <Location>ap-beijing</Location>
      <CreationDate>2019-05-24T11:49:50Z</CreationDate>
    </Bucket>
    <Bucket>
      <Name>examplebucket2-1250000000</Name>
      <Location>ap-guangzhou</Location>
      <CreationDate>2019-05-24T11:51:50Z</CreationDate>
    </Bucket>
  </Buckets>
</ListAllMyBucketsResult>"#;

        let res: ListAllMyBucketsResult = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(res.owner.display_name, "100000000001");
        assert_eq!(res.buckets.bucket.len(), 2);
        assert_eq!(
            res.buckets.bucket[1],
            BucketSummary {
                name: "examplebucket2-1250000000".to_string(),
                location: "ap-guangzhou".to_string(),
                creation_date: "2019-05-24T11:51:50Z".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_empty_buckets() {
        let xml =
            "<ListAllMyBucketsResult><Owner><ID>1</ID></Owner><Buckets/></ListAllMyBucketsResult>";
        let res: ListAllMyBucketsResult = quick_xml::de::from_str(xml).unwrap();
        assert!(res.buckets.bucket.is_empty());
    }
}
