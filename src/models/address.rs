use serde::{Deserialize, Serialize};

/// Dirección de envío guardada por el cliente
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Address {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    #[serde(rename = "currentAddress", default)]
    pub current_address: String,
}

impl Address {
    /// Copia sin `_id`, como la espera `shippingAddress` en el pedido
    pub fn shipping(&self) -> Address {
        Address {
            id: None,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AddressesResponse {
    #[serde(default)]
    pub addresses: Option<Vec<Address>>,
}

impl AddressesResponse {
    /// La última dirección de la lista es la más reciente
    pub fn latest(self) -> Option<Address> {
        self.addresses.and_then(|mut list| list.pop())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Street,
    City,
    District,
    CurrentAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: AddressField,
    pub message: &'static str,
}

/// Formulario del checkout
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddressForm {
    pub street: String,
    pub city: String,
    pub district: String,
    pub current_address: String,
}

impl AddressForm {
    /// Todos los campos son obligatorios (tras trim)
    pub fn validate(&self) -> Result<Address, Vec<FieldError>> {
        let checks = [
            (AddressField::Street, &self.street, "Street is required"),
            (AddressField::City, &self.city, "City is required"),
            (AddressField::District, &self.district, "District is required"),
            (
                AddressField::CurrentAddress,
                &self.current_address,
                "Current Address is required",
            ),
        ];

        let errors: Vec<FieldError> = checks
            .iter()
            .filter(|(_, value, _)| value.trim().is_empty())
            .map(|(field, _, message)| FieldError {
                field: *field,
                message: *message,
            })
            .collect();

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Address {
            id: None,
            street: self.street.trim().to_string(),
            city: self.city.trim().to_string(),
            district: self.district.trim().to_string(),
            current_address: self.current_address.trim().to_string(),
        })
    }
}
