//! Bundled site content
//!
//! Leaf data compiled into the crate: the pre-CMS arrays of the original site
//! and the two JSON documents read by the static content source. Malformed
//! entries here are build defects, not runtime conditions.

use crate::models::{LegacyFeaturePartner, LegacyHeaderLink, LegacyPerson, LegacySection};

/// Site settings document, without the footer year
pub const SETTINGS_JSON: &str = include_str!("../../data/settings.json");

/// Home page document: hero section and section titles
pub const HOME_PAGE_JSON: &str = include_str!("../../data/pages/home.json");

/// Borrowed form of [`LegacyPerson`] so the arrays can live in statics
#[derive(Debug, Clone, Copy)]
pub struct LegacyPersonRecord {
    pub name: &'static str,
    pub image: &'static str,
    pub role: &'static str,
}

impl LegacyPersonRecord {
    pub fn to_owned_person(&self) -> LegacyPerson {
        LegacyPerson {
            name: self.name.to_string(),
            image: self.image.to_string(),
            role: self.role.to_string(),
        }
    }
}

pub fn about() -> LegacySection {
    LegacySection {
        title: "New to cryptocurrency? No problem. Digital assets are here to stay, join us to learn & connect.".to_string(),
        subtitle: "We're showcasing the best crypto companies, leaders on one Coin Nations Global Summit".to_string(),
        color: "#3f354d".to_string(),
        bg: "/static/images/about/bg.png".to_string(),
    }
}

pub fn invite() -> LegacySection {
    LegacySection {
        title: "Coin Nations Summit invites you to discover a whole new world of crypto possibilities.".to_string(),
        subtitle: "Trading digital assets is changing the way the world thinks about money and finance. Join the best 2021 Coin Nations Summit to take part in the new world economy.".to_string(),
        color: "#fff".to_string(),
        bg: "/static/images/invite/bg.png".to_string(),
    }
}

pub static PARTNER_LOGOS: &[&str] = &[
    "/images/our_partners/visa.png",
    "/images/our_partners/circle.jpeg",
    "/images/our_partners/Nuvei.png",
    "/images/our_supporters/black-mp-logo.png",
    "/images/our_partners/celsius.png",
];

pub static SUPPORTER_LOGOS: &[&str] = &[
    "/images/our_supporters/MoonWhiteOnBlackSquare.png",
    "/images/our_supporters/Draper.png",
    "/images/our_supporters/simetria.io.png",
    "/images/our_supporters/CM_Logo.png",
    "/images/our_supporters/BCB-GROUP-LOGO-BLUE-RGB.png",
    "/images/our_supporters/Blockchain_BLUE_BG.png",
    "/images/our_supporters/FF_LogoFinal_Black5-optimized.png",
    "/images/our_supporters/ZenGo_Logo.png",
    "/images/our_supporters/Simplex_logo.png",
    "/images/our_supporters/IMG_9649.jpg",
    "/images/our_supporters/blockchain_founder_fund.png",
    "/images/our_supporters/Whub.jpeg",
    "/images/our_supporters/amber.png",
    "/images/our_supporters/ConsenSys.png",
    "/images/our_supporters/nash.png",
    "/images/our_supporters/Niftys.png",
    "/images/our_supporters/UniqueNetworkLogo.svg",
    "/images/our_supporters/gk8_logo.jpg",
    "/images/our_supporters/fuse_logo.svg",
    "/images/our_supporters/black-mp-logo.png",
    "/images/our_supporters/Flagship_logo.png",
    "/images/our_supporters/The_Paypers_logo.png",
    "/images/our_supporters/Cheeze.png",
    "/images/our_supporters/token_bay_logo.png",
    "/images/our_supporters/GLOZAL.png",
    "/images/our_supporters/SuperWorld.png",
    "/images/our_supporters/bitcoin.png",
    "/images/our_supporters/GMG-logos.jpeg",
    "/images/our_supporters/logo_splinterlands_characters_beta_1200.png",
    "/images/our_supporters/CryptoCanal.png",
    "/images/our_supporters/Blockdata_logoFINAL.png",
    "/images/our_supporters/flow_logo.png",
    "/images/our_supporters/BIS.jpg",
    "/images/our_supporters/bitpay.png",
    "/images/our_supporters/coinbase-in.png",
    "/images/our_supporters/Crypto.com_Blue stacked.png",
    "/images/our_supporters/BAS_logo_FA_-Horizontal_RGB-Web.png",
    "/images/our_supporters/etoro.jpeg",
    "/images/our_supporters/H_Logomark_Lockup_black.png",
];

pub static SPEAKERS: &[LegacyPersonRecord] = &[
    LegacyPersonRecord {
        name: "Catherine Gu",
        image: "/images/our_speakers/Catherine_Gu.png",
        role: "Global CBDC Lead at Visa",
    },
    LegacyPersonRecord {
        name: "Tim Draper",
        image: "/images/our_speakers/Tim_Draper.png",
        role: "Founder, Draper Associates, DFJ, and Draper University.",
    },
    LegacyPersonRecord {
        name: "Nikola Plecas",
        image: "/images/our_speakers/Nikola_Plecas.png",
        role: "Director, Crypto Solutions, Europe, Visa",
    },
    LegacyPersonRecord {
        name: "Raj Parekh",
        image: "/images/our_speakers/Raj_Parekh.png",
        role: "Director of Global Crypto Products at Visa",
    },
    LegacyPersonRecord {
        name: "AJ Shanley",
        image: "/images/our_speakers/AJ_Shanley.png",
        role: "VP and Head of Crypto Solutions & Operations at Visa",
    },
    LegacyPersonRecord {
        name: "Dante Disparte",
        image: "/images/our_speakers/Dante_Disparte.png",
        role: "Chief Strategy Officer and Head of Global Policy at Circle",
    },
    LegacyPersonRecord {
        name: "Chris Aruliah",
        image: "/images/our_speakers/Chris_Aruliah.png",
        role: "Chief Product Officer - BCB Group",
    },
    LegacyPersonRecord {
        name: "Ken Kruger",
        image: "/images/our_speakers/Ken_Kruger.png",
        role: "Founder & CEO - Moon",
    },
    LegacyPersonRecord {
        name: "Alex Mashinsky",
        image: "/images/our_speakers/Alex_Mashinsky.png",
        role: "Founder and CEO, Celsius",
    },
    LegacyPersonRecord {
        name: "Lou Kerner",
        image: "/images/our_speakers/Lou.png",
        role: "Partner, Blockchain Coinvestors",
    },
    LegacyPersonRecord {
        name: "Dr. Oriol Caudevilla",
        image: "/images/our_speakers/oriol.jpg",
        role: "Management and Strategy Consultant, FinTech Advisor",
    },
    LegacyPersonRecord {
        name: "Alex Adelman",
        image: "/images/our_speakers/Alex_Adelman.png",
        role: "CEO and Co-founder Lolli",
    },
    LegacyPersonRecord {
        name: "Joshua Johnson",
        image: "/images/our_speakers/Joshua_Johnson.png",
        role: "Founder and CEO Financial InterNetWork",
    },
    LegacyPersonRecord {
        name: "Joseph Langenbrunner",
        image: "/images/our_speakers/Joseph_Langenbrunner.png",
        role: "Deputy Head of Mission to The United States of America for The Republic of Liberland",
    },
    LegacyPersonRecord {
        name: "Kirsten Collins",
        image: "/images/our_speakers/Kirsten_Collins.png",
        role: "NFT Artist, Music Artist, Singer Song-Writer, Social Media Influencer, Actress, Model",
    },
    LegacyPersonRecord {
        name: "Yael Tamar",
        image: "/images/our_speakers/Yael_Tamar.png",
        role: "Co-CEO and Co-founder SolidBlock",
    },
    LegacyPersonRecord {
        name: "Ilan Steiner",
        image: "/images/our_speakers/Ilan_Steiner.png",
        role: "COO Simetria",
    },
    LegacyPersonRecord {
        name: "Alexander Barabanov",
        image: "/images/our_speakers/Alexander_Barabanov.png",
        role: "Co-founder, CEO at Unique",
    },
    LegacyPersonRecord {
        name: "Syed Musheer Ahmed",
        image: "/images/our_speakers/Syed_Musheer_Ahmed.png",
        role: "Founder & MD at Finstep Asia",
    },
    LegacyPersonRecord {
        name: "Lior Lamesh",
        image: "/images/our_speakers/Lior_Lamesh.png",
        role: "Co-Founder and CEO at GK8",
    },
    LegacyPersonRecord {
        name: "Ivan Soto-Wright",
        image: "/images/our_speakers/Ivan_Soto-Wright.png",
        role: "Co-Founder & CEO at MoonPay",
    },
    LegacyPersonRecord {
        name: "Lucy Gazmararian",
        image: "/images/our_speakers/Lucy_Gazmararian.png",
        role: "Founder & Managing Partner at Token Bay Capital",
    },
    LegacyPersonRecord {
        name: "Gilat Alon Shemesh",
        image: "/images/our_speakers/Gilat_Alon_Shemesh.png",
        role: "Wingate Asset Management",
    },
    LegacyPersonRecord {
        name: "Mélisande Mual",
        image: "/images/our_speakers/Melisande_Mual.png",
        role: "Publisher of The Paypers",
    },
    LegacyPersonRecord {
        name: "Joel Van Arsdale",
        image: "/images/our_speakers/Joel_Van_Arsdale.png",
        role: "Managing Partner at Flagship Advisory Partners",
    },
    LegacyPersonRecord {
        name: "Simon Hudson",
        image: "/images/our_speakers/Simon_Hudson.png",
        role: "CEO at Cheeze",
    },
    LegacyPersonRecord {
        name: "Tarek Kirschen",
        image: "/images/our_speakers/Tarek_Kirschen.png",
        role: "Founder & CEO at GLOZAL",
    },
    LegacyPersonRecord {
        name: "Hrish Lotlikar",
        image: "/images/our_speakers/Hrish_Lotlikar.png",
        role: "Co-Founder & CEO at SuperWorld",
    },
    LegacyPersonRecord {
        name: "David Berkowitz",
        image: "/images/our_speakers/David_Berkowitz.png",
        role: "CMO Coin Creator & Serial Marketers community",
    },
    LegacyPersonRecord {
        name: "Jesse \"Aggroed\" Reich",
        image: "/images/our_speakers/Jesse_Aggroed_Reich.png",
        role: "Founder Splinterlands",
    },
    LegacyPersonRecord {
        name: "Bored Elon",
        image: "/images/our_speakers/Bored_Elon_Musk.png",
        role: "@BoredElonMusk",
    },
    LegacyPersonRecord {
        name: "Jonathan Knegtel",
        image: "/images/our_speakers/Jonathan_Knegtel.png",
        role: "Co-founder & General Manager of Blockdata",
    },
    LegacyPersonRecord {
        name: "Wei Yu",
        image: "/images/our_speakers/Wei_Yu.png",
        role: "Head of Marketing at Flow",
    },
    LegacyPersonRecord {
        name: "Cory Klippsten",
        image: "/images/our_speakers/Cory_Klippsten.png",
        role: "Founder and CEO at Swan Bitcoin",
    },
    LegacyPersonRecord {
        name: "Cameron Chell",
        image: "/images/our_speakers/Cameron_Chell.png",
        role: "Executive Chairman - CurrencyWorks Co-Head - VUELE",
    },
    LegacyPersonRecord {
        name: "Ben Samaroo",
        image: "/images/our_speakers/Ben_Samaroo.png",
        role: "Co-Founder and CEO at WonderFi",
    },
    LegacyPersonRecord {
        name: "Christopher Torres",
        image: "/images/our_speakers/Christopher_Torres.png",
        role: "Artist at Nyan Cat",
    },
    LegacyPersonRecord {
        name: "Asher Westropp-Evans",
        image: "/images/our_speakers/Asher_Westropp-Evans.png",
        role: "Story Producer & Co-Host at Coins",
    },
    LegacyPersonRecord {
        name: "Merrick Theobald",
        image: "/images/our_speakers/Merrick_Theobald.png",
        role: "VP of Marketing at BitPay",
    },
    LegacyPersonRecord {
        name: "Ben Floyd",
        image: "/images/our_speakers/Ben_Floyd.png",
        role: "Head of Execution Services at Coinbase Institutional",
    },
    LegacyPersonRecord {
        name: "Volen Tsolov",
        image: "/images/our_speakers/Volen_Tsolov.png",
        role: "COO at GLOZAL, Inc",
    },
    LegacyPersonRecord {
        name: "Eric Anziani",
        image: "/images/our_speakers/Eric_Anziani.png",
        role: "Chief Operating Officer at Crypto.com",
    },
    LegacyPersonRecord {
        name: "Daniel Eidan",
        image: "/images/our_speakers/Daniel_Eidan.png",
        role: "Adviser and Solution Architect at the Bank for International Settlements (BIS)",
    },
    LegacyPersonRecord {
        name: "Karena Belin",
        image: "/images/our_speakers/Karena_Belin.png",
        role: "Karena Belin, Co-founder & CEO WHub",
    },
    LegacyPersonRecord {
        name: "Chia Hock Lai",
        image: "/images/our_speakers/Chia_Hock_Lai.png",
        role: "Co-chairman Blockchain Association Singapore",
    },
    LegacyPersonRecord {
        name: "Brad Michelson",
        image: "/images/our_speakers/Brad_Michelson.png",
        role: "Head of US Digital Assets Marketing at eToro",
    },
    LegacyPersonRecord {
        name: "Jordan Fried",
        image: "/images/our_speakers/Jordan_Fried.png",
        role: "Chairman & CEO of Immutable Holdings",
    },
];

pub static TEAM: &[LegacyPersonRecord] = &[
    LegacyPersonRecord {
        name: "Nir Kouris",
        image: "/images/our_team/136333043_684932272198707_4010410310317845982_n.jpg",
        role: "Founder of Coin Nations",
    },
    LegacyPersonRecord {
        name: "Shahar Ami Mizrahi",
        image: "/images/our_team/Shahar_Ami_Mizrahi.jpg",
        role: "Technology Guru",
    },
    LegacyPersonRecord {
        name: "Ignacio Agramont",
        image: "/images/our_team/136158881_872894413470639_7092431772786744317_n.jpg",
        role: "Hackathon Manager",
    },
    LegacyPersonRecord {
        name: "Matan Shaviro",
        image: "/images/our_team/Matan_Shaviro.png",
        role: "Full Stack Developer - Coin Nations",
    },
    LegacyPersonRecord {
        name: "Ivan Sangueza Alarcon",
        image: "/images/our_team/Ivan.png",
        role: "Video Manager - Coin Nations",
    },
];

pub fn header_links() -> Vec<LegacyHeaderLink> {
    [("Speakers", "#Speakers"), ("Discord", "#Discord")]
        .into_iter()
        .map(|(title, link)| LegacyHeaderLink {
            title: title.to_string(),
            link: link.to_string(),
        })
        .collect()
}

pub fn feature_partners() -> Vec<LegacyFeaturePartner> {
    [
        ("WeDiggIT", "45px", "242px"),
        ("Celsius", "38px", "165px"),
        ("Digital_Bank", "44px", "113px"),
        ("ZenGo", "52px", "121px"),
    ]
    .into_iter()
    .map(|(name, height, width)| LegacyFeaturePartner {
        name: name.to_string(),
        height: height.to_string(),
        width: width.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_embedded_documents_are_json() {
        assert!(serde_json::from_str::<serde_json::Value>(SETTINGS_JSON).is_ok());
        assert!(serde_json::from_str::<serde_json::Value>(HOME_PAGE_JSON).is_ok());
    }

    #[test]
    fn test_people_have_required_fields() {
        for record in SPEAKERS.iter().chain(TEAM.iter()) {
            assert!(!record.name.trim().is_empty());
            assert!(!record.role.trim().is_empty());
            assert!(record.image.starts_with("/images/"));
        }
    }

    #[test]
    fn test_speaker_names_unique() {
        let names: HashSet<&str> = SPEAKERS.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), SPEAKERS.len());
    }
}
