//! Labels for the Steam result codes ASF reports when redeeming keys
//!
//! Older ASF builds send the numeric `EResult` / `EPurchaseResultDetail`
//! values, newer ones the enum names. [`label_or_raw`] accepts either.

use serde_json::Value;

const RESULT_LABELS: &[(i64, &str)] = &[
    (0, "Invalid"),
    (1, "OK"),
    (2, "Fail"),
    (3, "NoConnection"),
    (5, "InvalidPassword"),
    (6, "LoggedInElsewhere"),
    (7, "InvalidProtocolVer"),
    (8, "InvalidParam"),
    (9, "FileNotFound"),
    (10, "Busy"),
    (11, "InvalidState"),
    (12, "InvalidName"),
    (13, "InvalidEmail"),
    (14, "DuplicateName"),
    (15, "AccessDenied"),
    (16, "Timeout"),
    (17, "Banned"),
    (18, "AccountNotFound"),
    (19, "InvalidSteamID"),
    (20, "ServiceUnavailable"),
    (21, "NotLoggedOn"),
    (22, "Pending"),
    (23, "EncryptionFailure"),
    (24, "InsufficientPrivilege"),
    (25, "LimitExceeded"),
    (26, "Revoked"),
    (27, "Expired"),
    (28, "AlreadyRedeemed"),
    (29, "DuplicateRequest"),
    (30, "AlreadyOwned"),
    (31, "IPNotFound"),
    (32, "PersistFailed"),
    (33, "LockingFailed"),
    (34, "LogonSessionReplaced"),
    (35, "ConnectFailed"),
    (36, "HandshakeFailed"),
    (37, "IOFailure"),
    (38, "RemoteDisconnect"),
    (39, "ShoppingCartNotFound"),
    (40, "Blocked"),
    (41, "Ignored"),
    (42, "NoMatch"),
    (43, "AccountDisabled"),
    (44, "ServiceReadOnly"),
    (45, "AccountNotFeatured"),
    (46, "AdministratorOK"),
    (47, "ContentVersion"),
    (48, "TryAnotherCM"),
    (49, "PasswordRequiredToKickSession"),
    (50, "AlreadyLoggedInElsewhere"),
    (51, "Suspended"),
    (52, "Cancelled"),
    (53, "DataCorruption"),
    (54, "DiskFull"),
    (55, "RemoteCallFailed"),
    (56, "PasswordUnset"),
    (57, "ExternalAccountUnlinked"),
    (58, "PSNTicketInvalid"),
    (59, "ExternalAccountAlreadyLinked"),
    (60, "RemoteFileConflict"),
    (61, "IllegalPassword"),
    (62, "SameAsPreviousValue"),
    (63, "AccountLogonDenied"),
    (64, "CannotUseOldPassword"),
    (65, "InvalidLoginAuthCode"),
    (66, "AccountLogonDeniedNoMail"),
    (67, "HardwareNotCapableOfIPT"),
    (68, "IPTInitError"),
    (69, "ParentalControlRestricted"),
    (70, "FacebookQueryError"),
    (71, "ExpiredLoginAuthCode"),
    (72, "IPLoginRestrictionFailed"),
    (73, "AccountLockedDown"),
    (74, "AccountLogonDeniedVerifiedEmailRequired"),
    (75, "NoMatchingURL"),
    (76, "BadResponse"),
    (77, "RequirePasswordReEntry"),
    (78, "ValueOutOfRange"),
    (79, "UnexpectedError"),
    (80, "Disabled"),
    (81, "InvalidCEGSubmission"),
    (82, "RestrictedDevice"),
    (83, "RegionLocked"),
    (84, "RateLimitExceeded"),
];

const PURCHASE_RESULT_DETAIL_LABELS: &[(i64, &str)] = &[
    (0, "NoDetail"),
    (1, "AVSFailure"),
    (2, "InsufficientFunds"),
    (3, "ContactSupport"),
    (4, "Timeout"),
    (5, "InvalidPackage"),
    (6, "InvalidPaymentMethod"),
    (7, "InvalidData"),
    (8, "OthersInProgress"),
    (9, "AlreadyPurchased"),
    (10, "WrongPrice"),
    (11, "FraudCheckFailed"),
    (12, "CancelledByUser"),
    (13, "RestrictedCountry"),
    (14, "BadActivationCode"),
    (15, "DuplicateActivationCode"),
    (16, "UseOtherPaymentMethod"),
    (17, "UseOtherFunctionSource"),
    (18, "InvalidShippingAddress"),
    (19, "RegionNotSupported"),
    (20, "AcctIsBlocked"),
    (21, "AcctNotVerified"),
    (22, "InvalidAccount"),
    (23, "StoreBillingCountryMismatch"),
    (24, "DoesNotOwnRequiredApp"),
    (25, "CanceledByNewTransaction"),
    (26, "ForceCanceledPending"),
    (27, "FailCurrencyTransProvider"),
    (28, "FailedCyberCafe"),
    (29, "NeedsPreApproval"),
    (30, "PreApprovalDenied"),
    (31, "WalletCurrencyMismatch"),
    (32, "EmailNotValidated"),
    (33, "ExpiredCard"),
    (34, "TransactionExpired"),
    (35, "WouldExceedMaxWallet"),
    (36, "MustLoginPS3AppForPurchase"),
    (37, "CannotShipToPOBox"),
    (38, "InsufficientInventory"),
    (39, "CannotGiftShippedGoods"),
    (40, "CannotShipInternationally"),
    (41, "BillingAgreementCancelled"),
    (42, "InvalidCoupon"),
    (43, "ExpiredCoupon"),
    (44, "AccountLocked"),
    (45, "OtherAbortableInProgress"),
    (46, "ExceededSteamLimit"),
    (47, "OverlappingPackagesInCart"),
    (48, "NoWallet"),
    (49, "NoCachedPaymentMethod"),
    (50, "CannotRedeemCodeFromClient"),
    (51, "PurchaseAmountNoSupportedByProvider"),
    (52, "OverlappingPackagesInPendingTransaction"),
    (53, "RateLimited"),
    (54, "OwnsExcludedApp"),
    (55, "CreditCardBinMismatchesType"),
    (56, "CartValueTooHigh"),
    (57, "BillingAgreementAlreadyExists"),
    (58, "POSACodeNotActivated"),
    (59, "CannotShipToCountry"),
    (60, "HungTransactionCancelled"),
    (61, "PaypalInternalError"),
    (62, "UnknownGlobalCollectError"),
    (63, "InvalidTaxAddress"),
    (64, "PhysicalProductLimitExceeded"),
    (65, "PurchaseCannotBeReplayed"),
    (66, "DelayedCompletion"),
    (67, "BundleTypeCannotBeGifted"),
];

fn lookup(table: &[(i64, &'static str)], code: i64) -> Option<&'static str> {
    table
        .iter()
        .find(|(value, _)| *value == code)
        .map(|(_, label)| *label)
}

pub fn result_label(code: i64) -> Option<&'static str> {
    lookup(RESULT_LABELS, code)
}

pub fn purchase_result_detail_label(code: i64) -> Option<&'static str> {
    lookup(PURCHASE_RESULT_DETAIL_LABELS, code)
}

/// Render a code field: strings pass through, known numbers become labels,
/// anything else is printed as-is.
pub fn label_or_raw(value: &Value, label: fn(i64) -> Option<&'static str>) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n
            .as_i64()
            .and_then(label)
            .map(str::to_string)
            .unwrap_or_else(|| n.to_string()),
        Value::Null => "Unknown".to_string(),
        other => other.to_string(),
    }
}
