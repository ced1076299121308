//! Closed sets of searchable fields, one enum per search domain.
//!
//! A field enum doubles as the domain marker: a filter tree is typed by its
//! field enum, so a contact field can never end up in an email-activity
//! query.

use std::fmt::Debug;

use strum::{AsRefStr, EnumIter};

/// A field that can appear on the left-hand side of a criterion.
///
/// The wire name is the `AsRef<str>` representation.
pub trait FilterField: AsRef<str> + Copy + Debug + PartialEq + Send + Sync + 'static {}

/// Domains whose records carry free-form `unique_args` that can be searched.
pub trait SupportsUniqueArgs: FilterField {}

/// Fields available when searching email activity (`/v3/messages`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum EmailActivitiesFilterField {
    MsgId,
    FromEmail,
    Subject,
    ToEmail,
    Status,
    TemplateId,
    AsmGroupId,
    ApiKeyId,
    Events,
    OriginatingIp,
    Categories,
    MarketingCampaignId,
    MarketingCampaignName,
    MarketingCampaignSplitId,
    MarketingCampaignVersion,
    LastEventTime,
    Teammate,
    OutboundIp,
    OutboundIpType,
    OpensCount,
    ClicksCount,
}

impl FilterField for EmailActivitiesFilterField {}
impl SupportsUniqueArgs for EmailActivitiesFilterField {}

/// Fields available when segmenting or searching marketing contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ContactsFilterField {
    ContactId,
    Email,
    FirstName,
    LastName,
    AlternateEmails,
    #[strum(serialize = "address_line_1")]
    AddressLine1,
    #[strum(serialize = "address_line_2")]
    AddressLine2,
    City,
    StateProvinceRegion,
    PostalCode,
    Country,
    PhoneNumber,
    ListIds,
    CreatedAt,
    UpdatedAt,
}

impl FilterField for ContactsFilterField {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn email_activity_fields_use_snake_case_wire_names() {
        assert_eq!(EmailActivitiesFilterField::OpensCount.as_ref(), "opens_count");
        assert_eq!(EmailActivitiesFilterField::MsgId.as_ref(), "msg_id");
        assert_eq!(EmailActivitiesFilterField::OriginatingIp.as_ref(), "originating_ip");
        assert_eq!(EmailActivitiesFilterField::LastEventTime.as_ref(), "last_event_time");
    }

    #[test]
    fn numbered_contact_fields_keep_their_separator() {
        assert_eq!(ContactsFilterField::AddressLine1.as_ref(), "address_line_1");
        assert_eq!(ContactsFilterField::AddressLine2.as_ref(), "address_line_2");
        assert_eq!(ContactsFilterField::StateProvinceRegion.as_ref(), "state_province_region");
    }

    #[test]
    fn wire_names_are_unique_per_domain() {
        let names: HashSet<String> = EmailActivitiesFilterField::iter()
            .map(|f| f.as_ref().to_owned())
            .collect();
        assert_eq!(names.len(), EmailActivitiesFilterField::iter().count());

        let contacts: HashSet<String> = ContactsFilterField::iter()
            .map(|f| f.as_ref().to_owned())
            .collect();
        assert_eq!(contacts.len(), ContactsFilterField::iter().count());
    }
}
