use super::domain::{Brand, BrandId, ModelId, PhoneModel};
use crate::valuation::{DeductionRule, Question, QuestionId, Trigger};

const SAMSUNG_IMAGE: &str = "https://images.unsplash.com/photo-1610945415295-d9bbf067e59c?w=400";
const XIAOMI_IMAGE: &str = "https://images.unsplash.com/photo-1598327105666-5b89351aff97?w=400";
const ONEPLUS_IMAGE: &str = "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=400";
const REALME_IMAGE: &str = "https://images.unsplash.com/photo-1585060544812-6b45742d762f?w=400";

pub(super) fn brands() -> Vec<Brand> {
    [
        ("samsung", "Samsung"),
        ("xiaomi", "Xiaomi"),
        ("oneplus", "OnePlus"),
        ("realme", "Realme"),
        ("vivo", "Vivo"),
        ("oppo", "Oppo"),
    ]
    .into_iter()
    .map(|(id, name)| Brand {
        id: BrandId::from(id),
        name: name.to_string(),
        logo: format!("/brands/{id}.png"),
    })
    .collect()
}

pub(super) fn models() -> Vec<PhoneModel> {
    [
        ("sam-s23", "samsung", "Galaxy S23", 45_000, SAMSUNG_IMAGE),
        ("sam-s22", "samsung", "Galaxy S22", 38_000, SAMSUNG_IMAGE),
        ("sam-a54", "samsung", "Galaxy A54", 28_000, SAMSUNG_IMAGE),
        ("xi-13pro", "xiaomi", "13 Pro", 42_000, XIAOMI_IMAGE),
        ("xi-12", "xiaomi", "12", 32_000, XIAOMI_IMAGE),
        ("xi-note12", "xiaomi", "Redmi Note 12 Pro", 22_000, XIAOMI_IMAGE),
        ("op-11", "oneplus", "11", 48_000, ONEPLUS_IMAGE),
        ("op-nord3", "oneplus", "Nord 3", 28_000, ONEPLUS_IMAGE),
        ("real-11pro", "realme", "11 Pro+", 30_000, REALME_IMAGE),
        ("real-narzo", "realme", "Narzo 60", 18_000, REALME_IMAGE),
    ]
    .into_iter()
    .map(|(id, brand_id, name, base_price, image)| PhoneModel {
        id: ModelId::from(id),
        brand_id: BrandId::from(brand_id),
        name: name.to_string(),
        base_price,
        image: image.to_string(),
    })
    .collect()
}

enum Seed {
    /// Percentage deducted when the answer is "yes".
    Yes(f64),
    /// Percentage deducted when the answer is "no".
    No(f64),
    BlockOnYes(&'static str),
    BlockOnNo(&'static str),
}

const BASIC: &str = "Basic Functionality";
const DISPLAY: &str = "Display";
const BATTERY: &str = "Battery";
const CAMERA: &str = "Camera";
const BODY: &str = "Body";
const WATER: &str = "Water Damage";
const SECURITY: &str = "Security";
const REPAIRS: &str = "Repair History";
const ACCESSORIES: &str = "Accessories";

const BATTERY_SEED: [(&str, &str, Seed); 45] = [
    ("Does the phone turn ON?", BASIC, Seed::BlockOnNo("Phone does not power on")),
    ("Does the phone charge properly?", BASIC, Seed::No(15.0)),
    ("Is the touchscreen fully responsive?", BASIC, Seed::No(12.0)),
    ("Are physical buttons working?", BASIC, Seed::No(5.0)),
    ("Is fingerprint sensor working?", BASIC, Seed::No(3.0)),
    ("Is face unlock working?", BASIC, Seed::No(2.0)),
    ("Are speakers functioning correctly?", BASIC, Seed::No(4.0)),
    ("Is microphone working?", BASIC, Seed::No(8.0)),
    ("Is vibration motor working?", BASIC, Seed::No(2.0)),
    ("Is WiFi working?", BASIC, Seed::No(5.0)),
    ("Is Bluetooth working?", BASIC, Seed::No(3.0)),
    ("Is mobile network detected?", BASIC, Seed::No(10.0)),
    ("Is GPS working?", BASIC, Seed::No(2.0)),
    ("Is the screen cracked or broken?", DISPLAY, Seed::Yes(20.0)),
    ("Are there dead pixels or lines on screen?", DISPLAY, Seed::Yes(15.0)),
    ("Is there screen discoloration?", DISPLAY, Seed::Yes(10.0)),
    ("Is there touch delay or ghost touch?", DISPLAY, Seed::Yes(12.0)),
    ("Is brightness normal?", DISPLAY, Seed::No(5.0)),
    ("Has display been replaced before?", DISPLAY, Seed::Yes(8.0)),
    ("Is battery backup normal (lasts full day)?", BATTERY, Seed::No(15.0)),
    ("Does phone heat abnormally?", BATTERY, Seed::Yes(10.0)),
    ("Is battery swelling?", BATTERY, Seed::Yes(25.0)),
    ("Has battery been replaced before?", BATTERY, Seed::Yes(5.0)),
    ("Is fast charging working?", BATTERY, Seed::No(5.0)),
    ("Is rear camera working?", CAMERA, Seed::No(12.0)),
    ("Is front camera working?", CAMERA, Seed::No(8.0)),
    ("Is there blurry or focus issue?", CAMERA, Seed::Yes(10.0)),
    ("Is flash working?", CAMERA, Seed::No(3.0)),
    ("Is camera glass cracked?", CAMERA, Seed::Yes(8.0)),
    ("Are there major dents or cracks on body?", BODY, Seed::Yes(15.0)),
    ("Is back panel damaged?", BODY, Seed::Yes(12.0)),
    ("Is frame bent?", BODY, Seed::Yes(18.0)),
    ("Are there water damage signs?", WATER, Seed::Yes(25.0)),
    ("Is there rust or corrosion near ports?", WATER, Seed::Yes(15.0)),
    ("Has phone been exposed to water?", WATER, Seed::Yes(20.0)),
    ("Are there moisture warnings?", WATER, Seed::Yes(10.0)),
    ("Is Google account removed?", SECURITY, Seed::BlockOnNo("Google account is still linked to the device")),
    ("Is screen lock removed?", SECURITY, Seed::No(5.0)),
    ("Is IMEI valid?", SECURITY, Seed::BlockOnNo("IMEI could not be validated")),
    ("Is device blacklisted?", SECURITY, Seed::BlockOnYes("Device is blacklisted")),
    ("Has any part been replaced?", REPAIRS, Seed::Yes(8.0)),
    ("Any third-party repairs done?", REPAIRS, Seed::Yes(10.0)),
    ("Do you have charger?", ACCESSORIES, Seed::No(2.0)),
    ("Do you have original box?", ACCESSORIES, Seed::No(3.0)),
    ("Do you have purchase bill?", ACCESSORIES, Seed::No(5.0)),
];

pub(super) fn questions() -> Vec<Question> {
    BATTERY_SEED
        .iter()
        .enumerate()
        .map(|(index, (text, category, seed))| {
            let rule = match seed {
                Seed::Yes(percent) => DeductionRule::Percentage {
                    percent: *percent,
                    trigger: Trigger::OnYes,
                },
                Seed::No(percent) => DeductionRule::Percentage {
                    percent: *percent,
                    trigger: Trigger::OnNo,
                },
                Seed::BlockOnYes(reason) => DeductionRule::Block {
                    reason: reason.to_string(),
                    trigger: Trigger::OnYes,
                },
                Seed::BlockOnNo(reason) => DeductionRule::Block {
                    reason: reason.to_string(),
                    trigger: Trigger::OnNo,
                },
            };

            Question {
                id: QuestionId(format!("q{}", index + 1)),
                text: text.to_string(),
                category: category.to_string(),
                order: index as u32 + 1,
                rule,
            }
        })
        .collect()
}
