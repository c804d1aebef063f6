//! Hand-built AADE response envelopes shared by the integration tests.
#![allow(dead_code)]

pub const NIL_ERROR_REC: &str = r#"<error_rec>
          <error_code xsi:nil="true"/>
          <error_descr xsi:nil="true"/>
        </error_rec>"#;

/// Wraps the content of `rg_ws_public2_result_rtType` in the full SOAP envelope.
pub fn response_envelope(inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<env:Envelope xmlns:env="http://www.w3.org/2003/05/soap-envelope" xmlns:srvc="http://rgwspublic2/RgWsPublic2Service" xmlns="http://rgwspublic2/RgWsPublic2" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <env:Header/>
  <env:Body>
    <srvc:rgWsPublic2AfmMethodResponse>
      <srvc:result>
        <rg_ws_public2_result_rtType>
        {}
        </rg_ws_public2_result_rtType>
      </srvc:result>
    </srvc:rgWsPublic2AfmMethodResponse>
  </env:Body>
</env:Envelope>"#,
        inner
    )
}

/// A successful lookup with a realistic `basic_rec` and `sector_count` items.
pub fn success_response(call_seq_id: &str, afm: &str, sector_count: usize) -> String {
    let items: String = (0..sector_count)
        .map(|i| {
            format!(
                r#"<item>
            <firm_act_code>{code}</firm_act_code>
            <firm_act_descr>ΔΡΑΣΤΗΡΙΟΤΗΤΑ {i}</firm_act_descr>
            <firm_act_kind>{kind}</firm_act_kind>
            <firm_act_kind_descr>{kind_descr}</firm_act_kind_descr>
          </item>"#,
                code = 62010000 + i,
                i = i,
                kind = if i == 0 { 1 } else { 2 },
                kind_descr = if i == 0 { "ΚΥΡΙΑ" } else { "ΔΕΥΤΕΡΕΥΟΥΣΑ" },
            )
        })
        .collect();

    response_envelope(&format!(
        r#"<call_seq_id>{call_seq_id}</call_seq_id>
        {error_rec}
        <basic_rec>
          <afm>{afm}</afm>
          <doy>1159</doy>
          <doy_descr>ΦΑΕ ΑΘΗΝΩΝ</doy_descr>
          <i_ni_flag_descr>ΜΗ ΦΠ</i_ni_flag_descr>
          <deactivation_flag>1</deactivation_flag>
          <deactivation_flag_descr>ΕΝΕΡΓΟΣ ΑΦΜ</deactivation_flag_descr>
          <firm_flag_descr>ΕΠΙΤΗΔΕΥΜΑΤΙΑΣ</firm_flag_descr>
          <onomasia>  ACME ΑΝΩΝΥΜΗ ΕΤΑΙΡΕΙΑ  </onomasia>
          <commer_title xsi:nil="true"/>
          <legal_status_descr>ΑΕ</legal_status_descr>
          <postal_address>ΠΑΝΕΠΙΣΤΗΜΙΟΥ</postal_address>
          <postal_address_no>10</postal_address_no>
          <postal_zip_code>10564</postal_zip_code>
          <postal_area_description>ΑΘΗΝΑ</postal_area_description>
          <regist_date>1990-01-01</regist_date>
          <stop_date xsi:nil="true"/>
          <normal_vat_system_flag>Y</normal_vat_system_flag>
        </basic_rec>
        <firm_act_tab>
          {items}
        </firm_act_tab>"#,
        call_seq_id = call_seq_id,
        error_rec = NIL_ERROR_REC,
        afm = afm,
        items = items,
    ))
}

/// A lookup AADE rejected with a business error.
pub fn error_response(call_seq_id: &str, code: &str, descr: &str) -> String {
    response_envelope(&format!(
        r#"<call_seq_id>{}</call_seq_id>
        <error_rec>
          <error_code>{}</error_code>
          <error_descr>{}</error_descr>
        </error_rec>
        <basic_rec>
          <afm xsi:nil="true"/>
          <onomasia xsi:nil="true"/>
        </basic_rec>"#,
        call_seq_id, code, descr
    ))
}
