use crate::domain::format::format_datetime;
use crate::domain::lead::Lead;
use crate::errors::ServerError;
use crate::responses::{xlsx_response, ResultResp};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

const HEADERS: [&str; 14] = [
    "ID",
    "Recebido em",
    "Tipo",
    "Nome",
    "E-mail",
    "Telefone",
    "Imóvel",
    "Mensagem",
    "Finalidade",
    "Tipo de imóvel",
    "Cidade",
    "Bairro",
    "Valor pretendido (R$)",
    "Lido",
];

fn xlsx_err(what: &str) -> impl Fn(rust_xlsxwriter::XlsxError) -> ServerError + '_ {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

fn write_opt(sheet: &mut Worksheet, r: u32, c: u16, value: Option<&str>) -> Result<(), ServerError> {
    if let Some(v) = value {
        sheet.write_string(r, c, v).map_err(xlsx_err("text cell"))?;
    }
    Ok(())
}

/// Builds the workbook bytes for the inbox export.
pub fn build_leads_workbook(leads: &[Lead]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Mensagens").map_err(xlsx_err("sheet name"))?;

    let bold = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(xlsx_err("header"))?;
    }

    for (i, lead) in leads.iter().enumerate() {
        let r = (i + 1) as u32;
        let offer = &lead.offer;

        worksheet
            .write_number(r, 0, lead.id as f64)
            .map_err(xlsx_err("id"))?;
        worksheet
            .write_string(r, 1, format_datetime(lead.created_at))
            .map_err(xlsx_err("date"))?;
        worksheet
            .write_string(r, 2, lead.kind.label())
            .map_err(xlsx_err("kind"))?;
        worksheet
            .write_string(r, 3, &lead.name)
            .map_err(xlsx_err("name"))?;
        write_opt(worksheet, r, 4, lead.email.as_deref())?;
        write_opt(worksheet, r, 5, lead.phone.as_deref())?;
        write_opt(worksheet, r, 6, lead.listing_title.as_deref())?;
        worksheet
            .write_string(r, 7, &lead.message)
            .map_err(xlsx_err("message"))?;
        write_opt(worksheet, r, 8, offer.purpose.map(|p| p.label()))?;
        write_opt(worksheet, r, 9, offer.property_type.map(|t| t.label()))?;
        write_opt(worksheet, r, 10, offer.city.as_deref())?;
        write_opt(worksheet, r, 11, offer.neighborhood.as_deref())?;
        if let Some(cents) = offer.price_cents {
            worksheet
                .write_number(r, 12, cents as f64 / 100.0)
                .map_err(xlsx_err("price"))?;
        }
        worksheet
            .write_string(r, 13, if lead.is_unread() { "Não" } else { "Sim" })
            .map_err(xlsx_err("read flag"))?;
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}

pub fn export_leads_xlsx(leads: &[Lead], now: i64) -> ResultResp {
    let buffer = build_leads_workbook(leads)?;
    let date = chrono::DateTime::from_timestamp(now, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "export".to_string());
    xlsx_response(buffer, &format!("mensagens_{date}.xlsx"))
}
