//! Bundled service map used when the remote map cannot be loaded.

use crate::domain::model::{ApplicationType, ServiceMap, ServiceMeta};
use crate::domain::model::ApplicationType::{Admin, Citizen, Hybrid};

/// slug, path, application type, periodic
const FALLBACK_SERVICES: &[(&str, &str, ApplicationType, bool)] = &[
    // 證明文件
    ("birth_certificate", "birth-certificate-applications", Citizen, false),
    ("death_certificate", "death-certificate-applications", Citizen, false),
    ("marriage_certificate", "marriage-certificate-applications", Citizen, false),
    // 許可與規費
    ("business_permit", "business-permits", Hybrid, false),
    ("hawking_permit", "hawking-permits", Hybrid, true),
    ("building_permit", "building-permits", Citizen, false),
    ("waste_management_levy", "waste-management-levies", Admin, false),
    ("market_stall", "market-stalls", Hybrid, false),
    ("vehicle_sticker", "vehicle-stickers", Hybrid, false),
    ("toll_ticket", "toll-tickets", Citizen, false),
    // 登記
    ("school_registration", "school-registrations", Citizen, false),
    ("community_hall_booking", "community-hall-bookings", Citizen, false),
    ("church_registration", "church-registrations", Citizen, false),
    // 衛生與環境
    ("environmental_compliance", "environmental-compliance", Admin, false),
    ("health_inspection", "health-inspections", Admin, false),
    ("health_facility_registration", "health-facility-registrations", Citizen, false),
    ("health_inspection_certificate", "health-inspection-certificates", Admin, false),
    // 身分與居留
    ("identification_letter", "identification-letters", Citizen, false),
    ("residency_confirmation", "residency-confirmations", Citizen, false),
    (
        "local_government_identification_letter",
        "local-government-identification-letters",
        Citizen,
        false,
    ),
    ("certificate_of_origin", "certificate-of-origin", Citizen, false),
    // 土地與物業
    ("property_tax", "land-property/property-taxes", Admin, false),
    ("land_use_charge", "land-property/land-use-charges", Admin, false),
    ("property_registration", "land-property/registrations", Citizen, false),
    ("property_rate_invoice", "land-property/invoices", Admin, false),
    // 調解與訴訟
    ("mediation_request", "mediation-requests", Citizen, false),
    ("local_court_filing", "local-court-filings", Citizen, false),
    // 廣告
    ("advertising_permit", "advertising-permits", Citizen, false),
    ("digital_ad_space_booking", "digital-ad-space-bookings", Citizen, false),
    ("mobile_ad_permit", "mobile-ad-permits", Citizen, false),
    ("ad_monitoring_report", "ad-monitoring-reports", Admin, false),
];

pub fn fallback_service_map() -> ServiceMap {
    ServiceMap::from_services(FALLBACK_SERVICES.iter().map(
        |&(slug, path, application_type, periodic)| ServiceMeta {
            slug: slug.to_string(),
            path: path.to_string(),
            application_type: Some(application_type),
            is_periodic: periodic.then_some(true),
            allowed_units: None,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_has_every_bundled_service() {
        let map = fallback_service_map();
        assert_eq!(map.len(), FALLBACK_SERVICES.len());
        assert_eq!(map.len(), 31);
    }

    #[test]
    fn test_fallback_entries_match_table() {
        let map = fallback_service_map();

        let property_tax = map.get("property_tax").unwrap();
        assert_eq!(property_tax.path, "land-property/property-taxes");
        assert_eq!(property_tax.application_type, Some(ApplicationType::Admin));

        let birth = map.get("birth_certificate").unwrap();
        assert_eq!(birth.path, "birth-certificate-applications");
        assert_eq!(birth.is_periodic, None);
    }

    #[test]
    fn test_only_hawking_permit_is_periodic() {
        let map = fallback_service_map();
        let periodic: Vec<&str> = map
            .iter()
            .filter(|meta| meta.is_periodic == Some(true))
            .map(|meta| meta.slug.as_str())
            .collect();
        assert_eq!(periodic, vec!["hawking_permit"]);
    }
}
