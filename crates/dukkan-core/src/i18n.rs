//! # Backend Message Translation
//!
//! The backend speaks English; the dashboard speaks Arabic. Every
//! user-visible backend string goes through [`translate`], which knows the
//! messages the backend actually emits and falls back to the raw string for
//! anything it has never seen, so an unknown message is still shown rather
//! than swallowed.
//!
//! Client-side failures (validation, stock checks) never reach the wire and
//! are localized directly by [`localize_core_error`].
//!
//! ## Example
//! ```rust
//! use dukkan_core::i18n::translate;
//!
//! assert_eq!(translate("Order created successfully."), "تم إنشاء الطلب بنجاح");
//! // Unknown strings pass through untouched
//! assert_eq!(translate("Totally new message"), "Totally new message");
//! ```

use crate::error::{CoreError, ValidationError};

// =============================================================================
// Fixed Client-Side Strings
// =============================================================================

/// Shown when the server cannot be reached at all.
pub const CONNECTION_FAILED: &str = "تعذر الاتصال بالخادم، يرجى المحاولة مرة أخرى";

/// Shown when a 401 ends the session.
pub const SESSION_EXPIRED: &str = "انتهت صلاحية الجلسة، يرجى تسجيل الدخول مرة أخرى";

/// Last-resort message for failures with no better description.
pub const UNEXPECTED_ERROR: &str = "حدث خطأ غير متوقع";

// =============================================================================
// Backend Message Table
// =============================================================================

/// Translates a backend message to Arabic, falling back to the input.
///
/// The table mirrors the messages the backend emits today. Resources whose
/// messages are not listed (products, customers) fall through to the raw
/// string by design.
pub fn translate(message: &str) -> &str {
    match message {
        // Auth messages
        "Login successful." => "تم تسجيل الدخول بنجاح",
        "Registration successful." => "تم إنشاء الحساب بنجاح",
        "Logged out successfully." => "تم تسجيل الخروج بنجاح",
        "If your email is registered, you will receive a password reset link shortly." => {
            "إذا كان بريدك الإلكتروني مسجلاً، ستتلقى رابط إعادة تعيين كلمة المرور قريباً"
        }
        "Password has been reset successfully." => "تم إعادة تعيين كلمة المرور بنجاح",

        // Common errors
        "Invalid email or password" => "البريد الإلكتروني أو كلمة المرور غير صحيحة",
        "Email already exists" => "البريد الإلكتروني مسجل مسبقاً",
        "Invalid or expired token" => "الرمز غير صالح أو منتهي الصلاحية",
        "User not found" => "المستخدم غير موجود",
        "Invalid OTP code" => "رمز التحقق غير صحيح",
        "OTP expired" => "رمز التحقق منتهي الصلاحية",

        // Order messages
        "Order created successfully." => "تم إنشاء الطلب بنجاح",
        "Orders retrieved successfully." => "تم استرجاع الطلبات بنجاح",
        "Order deleted successfully." => "تم حذف الطلب بنجاح",

        // Dashboard messages
        "Dashboard data retrieved successfully." => "تم استرجاع بيانات لوحة التحكم بنجاح",

        // Expense messages
        "Expense added successfully." => "تم إضافة المصروف بنجاح",
        "Expenses retrieved successfully." => "تم استرجاع المصروفات بنجاح",
        "Expense retrieved successfully." => "تم استرجاع المصروف بنجاح",
        "Expense updated successfully." => "تم تحديث المصروف بنجاح",
        "Expense deleted successfully." => "تم حذف المصروف بنجاح",
        "Expense not found" => "المصروف غير موجود",

        // Note messages
        "Note added successfully." => "تم إضافة الملاحظة بنجاح",
        "Notes retrieved successfully." => "تم استرجاع الملاحظات بنجاح",
        "Note retrieved successfully." => "تم استرجاع الملاحظة بنجاح",
        "Customer notes retrieved successfully." => "تم استرجاع ملاحظات العميل بنجاح",
        "Note updated successfully." => "تم تحديث الملاحظة بنجاح",
        "Note completion status toggled successfully." => "تم تغيير حالة الملاحظة بنجاح",
        "Note deleted successfully." => "تم حذف الملاحظة بنجاح",
        "Note not found" => "الملاحظة غير موجودة",

        // Profile messages
        "Profile retrieved successfully." => "تم استرجاع الملف الشخصي بنجاح",
        "Profile updated successfully." => "تم تحديث الملف الشخصي بنجاح",

        // Supplier messages
        "Supplier added successfully." => "تم إضافة المورد بنجاح",
        "Suppliers retrieved successfully." => "تم استرجاع الموردين بنجاح",
        "Supplier retrieved successfully." => "تم استرجاع المورد بنجاح",
        "Supplier updated successfully." => "تم تحديث المورد بنجاح",
        "Supplier deleted successfully." => "تم حذف المورد بنجاح",
        "Supplier not found" => "المورد غير موجود",

        other => other,
    }
}

// =============================================================================
// Client-Side Error Localization
// =============================================================================

/// Maps a client-side failure to the Arabic string the dialogs show.
pub fn localize_core_error(error: &CoreError) -> String {
    match error {
        CoreError::InsufficientStock { available, .. } => {
            format!("الكمية المتاحة في المخزون: {available}")
        }
        CoreError::InvalidDiscount { .. } => "يرجى إدخال نسبة خصم صحيحة (0-100)".to_string(),
        CoreError::EmptyOrder => "يرجى إضافة منتج واحد على الأقل".to_string(),
        CoreError::OrderTooLarge { .. } => {
            "تم الوصول إلى الحد الأقصى لعدد الأصناف في الطلب".to_string()
        }
        CoreError::QuantityTooLarge { .. } => "الكمية المدخلة كبيرة جداً".to_string(),
        CoreError::DepreciationLocked { .. } => {
            "لا يمكن تعديل بيانات الأصل بعد بدء احتساب الإهلاك".to_string()
        }
        CoreError::Validation(v) => localize_validation_error(v),
    }
}

/// Maps a validation failure to the Arabic string the dialogs show.
pub fn localize_validation_error(error: &ValidationError) -> String {
    match error {
        ValidationError::Required { .. } => "يرجى ملء جميع الحقول المطلوبة".to_string(),
        ValidationError::TooShort { min, .. } => {
            format!("القيمة المدخلة قصيرة جداً (الحد الأدنى {min} أحرف)")
        }
        ValidationError::TooLong { max, .. } => {
            format!("القيمة المدخلة طويلة جداً (الحد الأقصى {max} حرف)")
        }
        ValidationError::OutOfRange { .. } => "القيمة المدخلة خارج النطاق المسموح".to_string(),
        ValidationError::MustBePositive { .. } => "يرجى إدخال قيمة موجبة صحيحة".to_string(),
        ValidationError::InvalidFormat { .. } => "صيغة القيمة المدخلة غير صحيحة".to_string(),
        ValidationError::FileTooLarge { .. } => {
            "حجم الملف يتجاوز الحد الأقصى (5 ميجابايت)".to_string()
        }
        ValidationError::UnsupportedFileType { .. } => {
            "نوع الملف غير مدعوم، يرجى اختيار صورة".to_string()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_messages() {
        assert_eq!(translate("Login successful."), "تم تسجيل الدخول بنجاح");
        assert_eq!(
            translate("Supplier deleted successfully."),
            "تم حذف المورد بنجاح"
        );
        assert_eq!(translate("Invalid OTP code"), "رمز التحقق غير صحيح");
    }

    #[test]
    fn test_translate_falls_back_to_raw() {
        assert_eq!(
            translate("Product batch archived successfully."),
            "Product batch archived successfully."
        );
        assert_eq!(translate(""), "");
    }

    #[test]
    fn test_localize_insufficient_stock_carries_quantity() {
        let err = CoreError::InsufficientStock {
            name: "Sugar".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(localize_core_error(&err), "الكمية المتاحة في المخزون: 3");
    }

    #[test]
    fn test_localize_discount_and_empty_order() {
        assert_eq!(
            localize_core_error(&CoreError::InvalidDiscount { value: 120.0 }),
            "يرجى إدخال نسبة خصم صحيحة (0-100)"
        );
        assert_eq!(
            localize_core_error(&CoreError::EmptyOrder),
            "يرجى إضافة منتج واحد على الأقل"
        );
        assert_eq!(
            localize_core_error(&CoreError::OrderTooLarge { max: 100 }),
            "تم الوصول إلى الحد الأقصى لعدد الأصناف في الطلب"
        );
    }

    #[test]
    fn test_localize_validation_variants() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(
            localize_validation_error(&err),
            "يرجى ملء جميع الحقول المطلوبة"
        );

        let err = ValidationError::UnsupportedFileType {
            mime: "application/pdf".to_string(),
        };
        assert_eq!(
            localize_validation_error(&err),
            "نوع الملف غير مدعوم، يرجى اختيار صورة"
        );
    }
}
