use axum::{extract::Query, response::Html};

use crate::presentation::i18n::LangQuery;
use crate::presentation::middleware::gate::CurrentAdmin;
use crate::presentation::views::{Chrome, admin};

pub(crate) async fn hub(Query(query): Query<LangQuery>, current: CurrentAdmin) -> Html<String> {
    Html(admin::hub(&Chrome {
        lang: query.lang(),
        path: "/admin",
        admin: current.0.as_ref(),
    }))
}
