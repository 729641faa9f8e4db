#![allow(missing_docs, dead_code, non_snake_case)]

use leanjson::reflect_struct;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub Source: String,
    pub Campaign: String,
    pub Referrer: String,
    pub Experiments: Vec<String>,
    pub Score: f64,
}
reflect_struct!(Metadata {
    Source,
    Campaign,
    Referrer,
    Experiments,
    Score,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomFields {
    pub EmployeeID: String,
    pub Department: String,
    pub Team: String,
}
reflect_struct!(CustomFields {
    EmployeeID,
    Department,
    Team
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Features {
    pub BetaFeatures: bool,
    pub Analytics: bool,
    pub AdvancedSearch: bool,
}
reflect_struct!(Features {
    BetaFeatures,
    Analytics,
    AdvancedSearch
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexUser {
    pub ID: String,
    pub Username: String,
    pub Email: String,
    pub CreatedAt: String,
    pub LastLogin: String,
    pub IsActive: bool,
    pub Profile: ComplexProfile,
    pub Permissions: Vec<String>,
    pub Metadata: Metadata,
    pub Stats: ComplexStats,
}
reflect_struct!(ComplexUser {
    ID,
    Username,
    Email,
    CreatedAt,
    LastLogin,
    IsActive,
    Profile,
    Permissions,
    Metadata,
    Stats,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexProfile {
    pub FirstName: String,
    pub LastName: String,
    pub DisplayName: String,
    pub Bio: String,
    pub AvatarURL: String,
    pub BirthDate: String,
    pub PhoneNumbers: Vec<ComplexPhoneNumber>,
    pub Addresses: Vec<ComplexAddress>,
    pub SocialLinks: Vec<ComplexSocialLink>,
    pub Preferences: ComplexPreferences,
    pub CustomFields: CustomFields,
}
reflect_struct!(ComplexProfile {
    FirstName,
    LastName,
    DisplayName,
    Bio,
    AvatarURL,
    BirthDate,
    PhoneNumbers,
    Addresses,
    SocialLinks,
    Preferences,
    CustomFields,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexAddress {
    pub ID: String,
    pub Type: String,
    pub Street: String,
    pub Street2: String,
    pub City: String,
    pub State: String,
    pub Country: String,
    pub PostalCode: String,
    pub Coordinates: Option<Box<ComplexCoordinates>>,
    pub IsPrimary: bool,
    pub IsVerified: bool,
}
reflect_struct!(ComplexAddress {
    ID,
    Type,
    Street,
    Street2,
    City,
    State,
    Country,
    PostalCode,
    Coordinates,
    IsPrimary,
    IsVerified,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexCoordinates {
    pub Latitude: f64,
    pub Longitude: f64,
    pub Accuracy: i64,
}
reflect_struct!(ComplexCoordinates {
    Latitude,
    Longitude,
    Accuracy
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexPhoneNumber {
    pub ID: String,
    pub Type: String,
    pub Number: String,
    pub Extension: String,
    pub IsPrimary: bool,
    pub IsVerified: bool,
}
reflect_struct!(ComplexPhoneNumber {
    ID,
    Type,
    Number,
    Extension,
    IsPrimary,
    IsVerified,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexSocialLink {
    pub Platform: String,
    pub URL: String,
    pub Username: String,
    pub Verified: bool,
}
reflect_struct!(ComplexSocialLink {
    Platform,
    URL,
    Username,
    Verified
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexPreferences {
    pub Language: String,
    pub Timezone: String,
    pub Theme: String,
    pub Currency: String,
    pub DateFormat: String,
    pub TimeFormat: String,
    pub Notifications: ComplexNotificationPrefs,
    pub Privacy: ComplexPrivacySettings,
    pub Features: Features,
}
reflect_struct!(ComplexPreferences {
    Language,
    Timezone,
    Theme,
    Currency,
    DateFormat,
    TimeFormat,
    Notifications,
    Privacy,
    Features,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexNotificationPrefs {
    pub Email: bool,
    pub SMS: bool,
    pub Push: bool,
    pub InApp: bool,
    pub Marketing: bool,
}
reflect_struct!(ComplexNotificationPrefs {
    Email,
    SMS,
    Push,
    InApp,
    Marketing
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexPrivacySettings {
    pub ProfileVisibility: String,
    pub ShowEmail: bool,
    pub ShowPhone: bool,
    pub AllowMessaging: bool,
    pub BlockedUsers: Vec<String>,
}
reflect_struct!(ComplexPrivacySettings {
    ProfileVisibility,
    ShowEmail,
    ShowPhone,
    AllowMessaging,
    BlockedUsers,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexStats {
    pub LoginCount: i64,
    pub LastActivity: String,
    pub SessionDuration: i64,
    pub PageViews: i64,
    pub ActionsCount: i64,
    pub SubscriptionTier: String,
    pub StorageUsed: i64,
    pub BandwidthUsed: i64,
}
reflect_struct!(ComplexStats {
    LoginCount,
    LastActivity,
    SessionDuration,
    PageViews,
    ActionsCount,
    SubscriptionTier,
    StorageUsed,
    BandwidthUsed,
});

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn phone(id: &str, kind: &str, number: &str, extension: &str, primary: bool) -> ComplexPhoneNumber {
    ComplexPhoneNumber {
        ID: id.into(),
        Type: kind.into(),
        Number: number.into(),
        Extension: extension.into(),
        IsPrimary: primary,
        IsVerified: primary,
    }
}

fn social(platform: &str, url: &str, username: &str, verified: bool) -> ComplexSocialLink {
    ComplexSocialLink {
        Platform: platform.into(),
        URL: url.into(),
        Username: username.into(),
        Verified: verified,
    }
}

/// `count` users sharing one profile shape, differing in their identifiers.
pub fn complex_users(count: usize) -> Vec<ComplexUser> {
    (0..count).map(complex_user).collect()
}

pub fn complex_user(i: usize) -> ComplexUser {
    ComplexUser {
        ID: format!("user_{i}"),
        Username: format!("user_{i}_2024"),
        Email: format!("user{i}@example.com"),
        CreatedAt: "2024-06-12T10:00:00Z".into(),
        LastLogin: "2024-06-05T10:00:00Z".into(),
        IsActive: true,
        Profile: ComplexProfile {
            FirstName: "John".into(),
            LastName: "Doe".into(),
            DisplayName: "Johnny D".into(),
            Bio: "Software engineer passionate about technology and innovation".into(),
            AvatarURL: "https://cdn.example.com/avatars/john_doe.jpg".into(),
            BirthDate: "1990-01-01".into(),
            PhoneNumbers: vec![
                phone("ph_001", "mobile", "+1-555-123-4567", "", true),
                phone("ph_002", "work", "+1-555-987-6543", "1234", false),
            ],
            Addresses: vec![ComplexAddress {
                ID: "addr_001".into(),
                Type: "home".into(),
                Street: "123 Main Street".into(),
                City: "Anytown".into(),
                State: "CA".into(),
                Country: "USA".into(),
                PostalCode: "12345".into(),
                IsPrimary: true,
                IsVerified: true,
                Coordinates: Some(Box::new(ComplexCoordinates {
                    Latitude: 37.7749,
                    Longitude: -122.4194,
                    Accuracy: 10,
                })),
                ..ComplexAddress::default()
            }],
            SocialLinks: vec![
                social("twitter", "https://twitter.com/johndoe", "@johndoe", false),
                social("linkedin", "https://linkedin.com/in/johndoe", "johndoe", true),
            ],
            Preferences: ComplexPreferences {
                Language: "en-US".into(),
                Timezone: "America/Los_Angeles".into(),
                Theme: "light".into(),
                Currency: "USD".into(),
                DateFormat: "MM/DD/YYYY".into(),
                TimeFormat: "12h".into(),
                Notifications: ComplexNotificationPrefs {
                    Email: true,
                    SMS: false,
                    Push: true,
                    InApp: true,
                    Marketing: false,
                },
                Privacy: ComplexPrivacySettings {
                    ProfileVisibility: "friends".into(),
                    AllowMessaging: true,
                    ..ComplexPrivacySettings::default()
                },
                Features: Features {
                    BetaFeatures: true,
                    Analytics: true,
                    AdvancedSearch: false,
                },
            },
            CustomFields: CustomFields {
                EmployeeID: "EMP001".into(),
                Department: "Engineering".into(),
                Team: "Backend".into(),
            },
        },
        Permissions: strings(&["read", "write", "admin"]),
        Metadata: Metadata {
            Source: "web_signup".into(),
            Campaign: "summer_2024".into(),
            Referrer: "google".into(),
            Experiments: strings(&["new_ui", "faster_search"]),
            Score: 85.7,
        },
        Stats: ComplexStats {
            LoginCount: 1247,
            LastActivity: "2024-06-12T08:00:00Z".into(),
            SessionDuration: 3600,
            PageViews: 15643,
            ActionsCount: 892,
            SubscriptionTier: "premium".into(),
            StorageUsed: 2_147_483_648,
            BandwidthUsed: 10_737_418_240,
        },
    }
}

/// A second profile, with blocked users and sparse preferences.
pub fn alice_profile() -> ComplexProfile {
    ComplexProfile {
        FirstName: "Alice".into(),
        LastName: "Johnson".into(),
        DisplayName: "Alice J.".into(),
        Bio: "Data scientist and AI researcher".into(),
        AvatarURL: "https://example.com/alice.jpg".into(),
        BirthDate: "1988-07-20".into(),
        PhoneNumbers: vec![
            phone("ph_alice_1", "mobile", "+1-555-888-7777", "", true),
            phone("ph_alice_2", "home", "+1-555-666-5555", "", false),
        ],
        Addresses: vec![ComplexAddress {
            ID: "addr_alice_1".into(),
            Type: "home".into(),
            Street: "789 Science Drive".into(),
            City: "Tech City".into(),
            State: "TX".into(),
            Country: "USA".into(),
            PostalCode: "75001".into(),
            Coordinates: Some(Box::new(ComplexCoordinates {
                Latitude: 32.7767,
                Longitude: -96.797,
                Accuracy: 8,
            })),
            IsPrimary: true,
            IsVerified: true,
            ..ComplexAddress::default()
        }],
        SocialLinks: vec![
            social("researchgate", "https://researchgate.net/alice", "alice_research", true),
            social("twitter", "https://twitter.com/alicescience", "@alicescience", false),
        ],
        Preferences: ComplexPreferences {
            Language: "en-GB".into(),
            Theme: "auto".into(),
            Notifications: ComplexNotificationPrefs {
                Push: true,
                InApp: true,
                ..ComplexNotificationPrefs::default()
            },
            Privacy: ComplexPrivacySettings {
                ProfileVisibility: "private".into(),
                ShowPhone: true,
                BlockedUsers: strings(&["spammer1", "troll2", "bot3"]),
                ..ComplexPrivacySettings::default()
            },
            Features: Features {
                BetaFeatures: true,
                Analytics: false,
                AdvancedSearch: true,
            },
            ..ComplexPreferences::default()
        },
        CustomFields: CustomFields {
            EmployeeID: "SCI001".into(),
            Department: "Research".into(),
            Team: "AI".into(),
        },
    }
}

pub fn address_without_coordinates() -> ComplexAddress {
    ComplexAddress {
        ID: "test_nil".into(),
        Street: "No GPS Street".into(),
        City: "Unknown".into(),
        ..ComplexAddress::default()
    }
}

pub fn address_with_coordinates() -> ComplexAddress {
    ComplexAddress {
        ID: "test_coords".into(),
        Street: "GPS Street".into(),
        City: "Located".into(),
        Coordinates: Some(Box::new(ComplexCoordinates {
            Latitude: 40.7589,
            Longitude: -73.9851,
            Accuracy: 12,
        })),
        ..ComplexAddress::default()
    }
}

/// A user whose slices are all empty.
pub fn empty_user() -> ComplexUser {
    ComplexUser {
        ID: "empty_test".into(),
        Username: "empty_user".into(),
        Email: "empty@test.com".into(),
        Profile: ComplexProfile {
            FirstName: "Empty".into(),
            ..ComplexProfile::default()
        },
        ..ComplexUser::default()
    }
}
