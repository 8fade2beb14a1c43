//! Localized texts returned by the form endpoints.

use crate::locale::Locale;
use crate::submission::FormKind;

/// Response texts for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub contact_sent: &'static str,
    pub feedback_sent: &'static str,
    pub contact_failed: &'static str,
    pub feedback_failed: &'static str,
    pub invalid_form: &'static str,
    /// Contains `{minutes}`, filled in by [`Messages::throttled`]
    throttled_template: &'static str,
}

const TR: Messages = Messages {
    contact_sent: "Mesajınız başarıyla gönderildi ✅",
    feedback_sent: "Geri bildiriminiz başarıyla gönderildi ✅",
    contact_failed: "Mesaj gönderilirken bir hata oluştu ❌",
    feedback_failed: "Geri bildirim gönderilirken bir hata oluştu ❌",
    invalid_form: "Form verilerinde hata var. Lütfen kontrol ediniz.",
    throttled_template: "Çok fazla istek gönderdiniz. Lütfen {minutes} dakika sonra tekrar deneyin.",
};

const EN: Messages = Messages {
    contact_sent: "Your message has been sent successfully ✅",
    feedback_sent: "Your feedback has been sent successfully ✅",
    contact_failed: "An error occurred while sending your message ❌",
    feedback_failed: "An error occurred while sending your feedback ❌",
    invalid_form: "The form contains errors. Please check your entries.",
    throttled_template: "You have sent too many requests. Please try again in {minutes} minutes.",
};

const AR: Messages = Messages {
    contact_sent: "تم إرسال رسالتك بنجاح ✅",
    feedback_sent: "تم إرسال ملاحظاتك بنجاح ✅",
    contact_failed: "حدث خطأ أثناء إرسال رسالتك ❌",
    feedback_failed: "حدث خطأ أثناء إرسال ملاحظاتك ❌",
    invalid_form: "توجد أخطاء في بيانات النموذج. يرجى التحقق منها.",
    throttled_template: "لقد أرسلت طلبات كثيرة جدًا. يرجى المحاولة مرة أخرى بعد {minutes} دقيقة.",
};

/// Message catalog for a locale.
pub fn messages(locale: Locale) -> &'static Messages {
    match locale {
        Locale::Tr => &TR,
        Locale::En => &EN,
        Locale::Ar => &AR,
    }
}

impl Messages {
    pub fn sent(&self, kind: FormKind) -> &'static str {
        match kind {
            FormKind::Contact => self.contact_sent,
            FormKind::Feedback => self.feedback_sent,
        }
    }

    pub fn failed(&self, kind: FormKind) -> &'static str {
        match kind {
            FormKind::Contact => self.contact_failed,
            FormKind::Feedback => self.feedback_failed,
        }
    }

    /// Throttling text stating the window length, rounded up to whole minutes.
    pub fn throttled(&self, window_secs: u64) -> String {
        let minutes = window_secs.div_ceil(60).max(1);
        self.throttled_template
            .replace("{minutes}", &minutes.to_string())
    }
}
