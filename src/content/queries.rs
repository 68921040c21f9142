//! GROQ queries for the Sanity content store
//!
//! Collections are ordered by their `order` field in the query itself, so the
//! adapter returns them exactly as received.
//!
//! https://www.sanity.io/docs/groq

// Fragments are macros so the queries below can be assembled with `concat!`.

macro_rules! image_asset_fragment {
    () => {
        "asset->{ _id, url, metadata { lqip, dimensions { width, height } } }, alt, hotspot, crop"
    };
}

macro_rules! call_to_action_fragment {
    () => {
        "text, url, openInNewTab, style"
    };
}

macro_rules! navigation_link_fragment {
    () => {
        "title, url, openInNewTab"
    };
}

macro_rules! social_link_fragment {
    () => {
        "platform, url, handle"
    };
}

macro_rules! content_section_fragment {
    () => {
        concat!("title, subtitle, theme, backgroundImage { ", image_asset_fragment!(), " }")
    };
}

macro_rules! company_logo_fragment {
    () => {
        concat!(
            "name, logo { ",
            image_asset_fragment!(),
            " }, displayWidth, displayHeight"
        )
    };
}

macro_rules! contact_section_fragment {
    () => {
        "title, description, \
         fieldLabels { firstName, lastName, email, company, message }, \
         buttonText { default, submitting }, \
         messages { success, error, rateLimitError }, \
         validationMessages { firstNameRequired, lastNameRequired, emailRequired, emailInvalid, messageRequired }"
    };
}

macro_rules! person_projection {
    () => {
        concat!(
            "{ _id, name, role, type, company, image { ",
            image_asset_fragment!(),
            " }, bio, socialLinks[] { ",
            social_link_fragment!(),
            " }, featured, order }"
        )
    };
}

macro_rules! company_projection {
    () => {
        concat!(
            "{ _id, name, logo { ",
            image_asset_fragment!(),
            " }, website, tier, description, featured, order }"
        )
    };
}

/// Site settings singleton
pub const SITE_SETTINGS_QUERY: &str = concat!(
    "*[_type == \"siteSettings\"][0] { _id, title, description, keywords, ",
    "seo { siteUrl, siteName, locale, ogImage { image { ",
    image_asset_fragment!(),
    " }, width, height }, twitterHandle }, ",
    "logo { text, image { ",
    image_asset_fragment!(),
    " } }, ",
    "footer { copyrightText, year, email }, ",
    "primaryCta { ",
    call_to_action_fragment!(),
    " }, eventUrl, ",
    "navigation[] { ",
    navigation_link_fragment!(),
    " }, ",
    "contactSection { ",
    contact_section_fragment!(),
    " } }"
);

/// Home page singleton with its referenced people and companies resolved
pub const HOME_PAGE_QUERY: &str = concat!(
    "*[_type == \"homePage\"][0] { _id, ",
    "hero { headline, title, titleHighlight, subtitle, description, ",
    "backgroundImage { ",
    image_asset_fragment!(),
    " }, heroImage { ",
    image_asset_fragment!(),
    " }, cta { ",
    call_to_action_fragment!(),
    " }, featuredPartners[] { ",
    company_logo_fragment!(),
    " } }, ",
    "aboutSection { ",
    content_section_fragment!(),
    " }, inviteSection { ",
    content_section_fragment!(),
    " }, ",
    "partnersTitle, partners[]-> ",
    company_projection!(),
    ", supportersTitle, supporters[]-> ",
    company_projection!(),
    ", speakersTitle, speakers[]-> ",
    person_projection!(),
    ", teamTitle, team[]-> ",
    person_projection!(),
    " }"
);

pub const ALL_SPEAKERS_QUERY: &str = concat!(
    "*[_type == \"person\" && type == \"speaker\"] | order(order asc) ",
    person_projection!()
);

pub const ALL_TEAM_QUERY: &str = concat!(
    "*[_type == \"person\" && type == \"team\"] | order(order asc) ",
    person_projection!()
);

/// Takes `$id`
pub const PERSON_BY_ID_QUERY: &str = concat!(
    "*[_type == \"person\" && _id == $id][0] ",
    person_projection!()
);

/// Platinum, gold and silver companies
pub const ALL_PARTNERS_QUERY: &str = concat!(
    "*[_type == \"company\" && tier in [\"platinum\", \"gold\", \"silver\"]] | order(order asc) ",
    company_projection!()
);

pub const ALL_SUPPORTERS_QUERY: &str = concat!(
    "*[_type == \"company\" && tier == \"supporter\"] | order(order asc) ",
    company_projection!()
);

/// Takes `$id`
pub const COMPANY_BY_ID_QUERY: &str = concat!(
    "*[_type == \"company\" && _id == $id][0] ",
    company_projection!()
);

/// Per-type document counts, useful when checking a dataset after migration
pub const DOCUMENT_COUNTS_QUERY: &str = "{ \
    \"speakers\": count(*[_type == \"person\" && type == \"speaker\"]), \
    \"team\": count(*[_type == \"person\" && type == \"team\"]), \
    \"partners\": count(*[_type == \"company\" && tier in [\"platinum\", \"gold\", \"silver\"]]), \
    \"supporters\": count(*[_type == \"company\" && tier == \"supporter\"]), \
    \"siteSettings\": count(*[_type == \"siteSettings\"]), \
    \"homePage\": count(*[_type == \"homePage\"]) \
}";
