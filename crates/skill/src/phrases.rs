//! Phrase keys.
//!
//! One constant per concept so every call site agrees on the spelling.

pub const SKILL_NAME: &str = "SKILL_NAME";
pub const WELCOME: &str = "WELCOME";
pub const HELP: &str = "HELP";
pub const GOODBYE: &str = "GOODBYE";
pub const ERROR: &str = "ERROR";
pub const OK: &str = "OK";

pub const SIMPLE_HELLO: &str = "SIMPLE_HELLO";
pub const LEARN_MORE: &str = "LEARN_MORE";

pub const GREETINGS_SIMPLE: &str = "GREETINGS.SIMPLE";
pub const GREETINGS_SPECIAL_PRE: &str = "GREETINGS.SPECIAL.PRE";
pub const GREETINGS_SPECIAL_POST: &str = "GREETINGS.SPECIAL.POST";
pub const GREETINGS_UPSELL: &str = "GREETINGS.UPSELL";
pub const GREETINGS_ANOTHER: &str = "GREETINGS.ANOTHER";

pub const GREETINGS_PACK_PURCHASED: &str = "GREETINGS_PACK.PURCHASED";
pub const GREETINGS_PACK_PREMIUM_SUBSCRIPTION_PURCHASED: &str =
    "GREETINGS_PACK.PREMIUM_SUBSCRIPTION_PURCHASED";
pub const GREETINGS_PACK_UPSELL: &str = "GREETINGS_PACK.UPSELL";
pub const PREMIUM_SUBSCRIPTION_PURCHASED: &str = "PREMIUM_SUBSCRIPTION.PURCHASED";

pub const PRODUCTS_TO_PURCHASE: &str = "PRODUCTS.TO_PURCHASE";
pub const PRODUCTS_NO_MORE_FOR_PURCHASE: &str = "PRODUCTS.NO_MORE_FOR_PURCHASE";
pub const PRODUCTS_NOT_OFFERED: &str = "PRODUCTS.NOT_OFFERED";
pub const PRODUCTS_REPROMPT: &str = "PRODUCTS.REPROMPT";

pub const PURCHASE_HISTORY: &str = "PURCHASE.HISTORY";
pub const PURCHASE_HISTORY_REPROMPT: &str = "PURCHASE.HISTORY_REPROMPT";
pub const PURCHASE_NONE: &str = "PURCHASE.NONE";
pub const PURCHASE_NONE_REPROMPT: &str = "PURCHASE.NONE_REPROMPT";
pub const PURCHASE_ERROR: &str = "PURCHASE.ERROR";

pub const BUY_ACCEPTED_GREETINGS_PACK: &str = "BUY.ACCEPTED.GREETINGS_PACK";
pub const BUY_ACCEPTED_PREMIUM_SUBSCRIPTION: &str = "BUY.ACCEPTED.PREMIUM_SUBSCRIPTION";
pub const BUY_ACCEPTED_UNDEFINED: &str = "BUY.ACCEPTED.UNDEFINED";
pub const BUY_DECLINED: &str = "BUY.DECLINED";
pub const BUY_ERROR: &str = "BUY.ERROR";

/// `LANGUAGE.<TAG>` key for a greeting language's spoken name.
pub fn language_name(tag: &str) -> String {
    format!("LANGUAGE.{tag}")
}
