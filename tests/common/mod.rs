// Common test utilities for integration tests

use async_trait::async_trait;
use elby::catalog::{Catalog, ServiceDescription};
use elby::sync_errors::CatalogError;

/// Catalog stub returning a fixed snapshot
pub struct StaticCatalog {
    pub services: Vec<ServiceDescription>,
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn fetch(&self) -> Result<Vec<ServiceDescription>, CatalogError> {
        Ok(self.services.clone())
    }
}

/// Catalog stub whose control plane answers HTTP 500
pub struct FailingCatalog;

#[async_trait]
impl Catalog for FailingCatalog {
    async fn fetch(&self) -> Result<Vec<ServiceDescription>, CatalogError> {
        Err(CatalogError::ListFailed {
            namespace: "default".to_string(),
            reason: "HTTP 500".to_string(),
        })
    }
}

/// The service description from the end-to-end scenario
pub fn web_service() -> ServiceDescription {
    ServiceDescription {
        name: "web".to_string(),
        domain: Some("web.example.com".to_string()),
        ingress_hostnames: vec!["elbname-123.us-east-1.elb.amazonaws.com".to_string()],
    }
}

/// ELB client pointed at a mock endpoint with static test credentials
pub fn elb_client(endpoint: &str) -> aws_sdk_elasticloadbalancing::Client {
    let config = aws_sdk_elasticloadbalancing::Config::builder()
        .behavior_version(aws_sdk_elasticloadbalancing::config::BehaviorVersion::latest())
        .region(aws_sdk_elasticloadbalancing::config::Region::new("us-east-1"))
        .credentials_provider(aws_sdk_elasticloadbalancing::config::Credentials::new(
            "AKIDEXAMPLE",
            "notarealsecretkey",
            None,
            None,
            "static",
        ))
        .endpoint_url(endpoint)
        .build();

    aws_sdk_elasticloadbalancing::Client::from_conf(config)
}

/// Route53 client pointed at a mock endpoint with static test credentials
pub fn route53_client(endpoint: &str) -> aws_sdk_route53::Client {
    let config = aws_sdk_route53::Config::builder()
        .behavior_version(aws_sdk_route53::config::BehaviorVersion::latest())
        .region(aws_sdk_route53::config::Region::new("us-east-1"))
        .credentials_provider(aws_sdk_route53::config::Credentials::new(
            "AKIDEXAMPLE",
            "notarealsecretkey",
            None,
            None,
            "static",
        ))
        .endpoint_url(endpoint)
        .build();

    aws_sdk_route53::Client::from_conf(config)
}

/// DescribeLoadBalancers response body with a single description
pub fn describe_load_balancers_response(name: &str, canonical_zone_id: &str) -> String {
    format!(
        r#"<DescribeLoadBalancersResponse xmlns="http://elasticloadbalancing.amazonaws.com/doc/2012-06-01/">
  <DescribeLoadBalancersResult>
    <LoadBalancerDescriptions>
      <member>
        <LoadBalancerName>{name}</LoadBalancerName>
        <DNSName>{name}-123.us-east-1.elb.amazonaws.com</DNSName>
        <CanonicalHostedZoneNameID>{canonical_zone_id}</CanonicalHostedZoneNameID>
      </member>
    </LoadBalancerDescriptions>
  </DescribeLoadBalancersResult>
  <ResponseMetadata>
    <RequestId>83c88b9d-12b7-11e3-8b82-87b12EXAMPLE</RequestId>
  </ResponseMetadata>
</DescribeLoadBalancersResponse>"#
    )
}

/// ListHostedZonesByName response body with a single zone
pub fn list_hosted_zones_by_name_response(id: &str, name: &str) -> String {
    format!(
        r#"<ListHostedZonesByNameResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <HostedZones>
    <HostedZone>
      <Id>{id}</Id>
      <Name>{name}</Name>
      <CallerReference>C741617D-04E4-F8DE-B9D7-0D150FC61C2E</CallerReference>
      <Config>
        <PrivateZone>false</PrivateZone>
      </Config>
      <ResourceRecordSetCount>42</ResourceRecordSetCount>
    </HostedZone>
  </HostedZones>
  <IsTruncated>false</IsTruncated>
  <MaxItems>100</MaxItems>
</ListHostedZonesByNameResponse>"#
    )
}

/// ChangeResourceRecordSets response body
pub fn change_resource_record_sets_response() -> String {
    r#"<ChangeResourceRecordSetsResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <ChangeInfo>
    <Id>/change/C2682N5HXP0BZ4</Id>
    <Status>PENDING</Status>
    <SubmittedAt>2024-01-01T00:00:00.000Z</SubmittedAt>
  </ChangeInfo>
</ChangeResourceRecordSetsResponse>"#
        .to_string()
}
