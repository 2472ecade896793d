//! Validation helpers for API contract types

use crate::error::ApiContractError;
use crate::types::*;
use validator::Validate;

/// Validate an organization creation request
pub fn validate_organization_create(request: &OrganizationCreate) -> Result<(), ApiContractError> {
    request.validate()?;
    Ok(())
}

/// Validate a space creation request
pub fn validate_space_create(request: &SpaceCreate) -> Result<(), ApiContractError> {
    request.validate()?;
    if let Some(guid) = request.relationships.organization.guid() {
        validate_guid(guid)?;
    }
    Ok(())
}

/// Validate an app creation request
pub fn validate_app_create(request: &AppCreate) -> Result<(), ApiContractError> {
    request.validate()?;
    Ok(())
}

/// Validate an isolation segment creation request
pub fn validate_isolation_segment_create(
    request: &IsolationSegmentCreate,
) -> Result<(), ApiContractError> {
    request.validate()?;
    Ok(())
}

/// Validate an organization quota creation request
pub fn validate_organization_quota_create(
    request: &OrganizationQuotaCreate,
) -> Result<(), ApiContractError> {
    request.validate()?;
    Ok(())
}

/// Validate an app manifest before it is applied
pub fn validate_app_manifest(manifest: &AppManifest) -> Result<(), ApiContractError> {
    manifest.validate()?;
    Ok(())
}

/// Validate GUID format
pub fn validate_guid(guid: &str) -> Result<(), ApiContractError> {
    uuid::Uuid::parse_str(guid)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_space_create_valid() {
        let request = SpaceCreate::new("dev", "3691e277-eb88-4ddc-bec3-0111d9dd4ef5");
        assert!(validate_space_create(&request).is_ok());
    }

    #[test]
    fn test_validate_space_create_bad_org_guid() {
        let request = SpaceCreate::new("dev", "not-a-guid");
        assert!(matches!(
            validate_space_create(&request),
            Err(ApiContractError::Guid(_))
        ));
    }

    #[test]
    fn test_validate_create_requests_empty_name() {
        assert!(validate_organization_create(&OrganizationCreate::new("")).is_err());
        assert!(validate_app_create(&AppCreate::new("", "space-guid")).is_err());
        assert!(validate_isolation_segment_create(&IsolationSegmentCreate::new("")).is_err());
        assert!(validate_organization_quota_create(&OrganizationQuotaCreate::new("")).is_err());
        assert!(validate_app_manifest(&AppManifest::new("")).is_err());
    }

    #[test]
    fn test_validate_create_requests_valid() {
        assert!(validate_organization_create(&OrganizationCreate::new("acme")).is_ok());
        assert!(validate_app_manifest(&AppManifest::new("web")).is_ok());
    }
}
